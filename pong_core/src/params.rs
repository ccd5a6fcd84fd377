/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena (pixels)
    pub const ARENA_WIDTH: i32 = 1080;
    pub const ARENA_HEIGHT: i32 = 720;

    // Paddle
    pub const PADDLE_WIDTH: i32 = 20;
    pub const PADDLE_HEIGHT: i32 = 120;
    pub const PADDLE_SPEED: i32 = 15; // pixels per frame
    pub const PADDLE_MARGIN: i32 = 50; // gap between paddle and side edge

    // Ball
    pub const BALL_SIZE: i32 = 20; // radius 10
    pub const BALL_MAX_SPEED: i32 = 30;
    pub const SERVE_SPEEDS: [i32; 3] = [10, 12, 14];
    pub const SERVE_VERTICAL_SPEEDS: [i32; 6] = [-6, -4, -2, 2, 4, 6];
    pub const BOUNCE_JITTER: [i32; 2] = [-1, 1];

    // Match
    pub const STEP_REPEAT: u32 = 4;
    pub const TOP_SCORE: u32 = 20;

    // Colors (RGB)
    pub const PLAYER_ONE_COLOR: [u8; 3] = [102, 0, 204]; // purple
    pub const PLAYER_TWO_COLOR: [u8; 3] = [255, 255, 204]; // light yellow
    pub const BALL_COLOR: [u8; 3] = [255, 255, 255];
    pub const BACKGROUND_COLOR: [u8; 3] = [0, 0, 0];
}

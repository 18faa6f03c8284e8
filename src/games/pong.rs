use crossterm::event::KeyEvent;
use rand::Rng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::clock::StepClock;
use crate::event::FRAME_MS;
use crate::games::Game;
use crate::input::{Command, Keymap};
use crate::scores::{GameId, ScoreStore};

// Playfield in the classic 800x600 canvas units, scaled at render time.
const FIELD_W: f32 = 800.0;
const FIELD_H: f32 = 600.0;
const PADDLE_W: f32 = 12.0;
const PADDLE_H: f32 = 100.0;
const PLAYER_X: f32 = 24.0;
const AI_X: f32 = FIELD_W - 24.0 - PADDLE_W;
const PLAYER_STEP: f32 = 10.0;
const BALL_R: f32 = 6.0;
const WINNING_SCORE: u32 = 10;
const STEP_MS: u64 = 16;
// Serve speed range and the rally cap
const SERVE_VX_MIN: f32 = 4.0;
const SERVE_VX_MAX: f32 = 6.0;
const SERVE_VY_MAX: f32 = 3.0;
const MAX_VX: f32 = 12.0;
const SPEEDUP: f32 = 1.05;
const DEFLECT_VY: f32 = 6.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Vertical speed cap for the AI paddle, per tick.
    fn ai_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 4.0,
            Difficulty::Medium => 6.0,
            Difficulty::Hard => 8.0,
        }
    }

    /// Distance from the ball within which the AI does not bother moving.
    fn dead_zone(&self) -> f32 {
        match self {
            Difficulty::Easy => 40.0,
            Difficulty::Medium => 20.0,
            Difficulty::Hard => 4.0,
        }
    }

    /// The AI reconsiders its paddle only every this-many ticks.
    fn reaction_ticks(&self) -> u32 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 2,
            Difficulty::Hard => 1,
        }
    }

    fn next(&self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    fn prev(&self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Steer {
    Up,
    Down,
}

pub struct Pong {
    // Paddle tops; the ball is tracked by its center.
    player_y: f32,
    ai_y: f32,
    ball_x: f32,
    ball_y: f32,
    ball_vx: f32,
    ball_vy: f32,
    player_score: u32,
    ai_score: u32,
    difficulty: Difficulty,
    /// Buffered steer, consumed by the next tick. Key repeat keeps it fed.
    steer: Option<Steer>,
    /// Reaction delay: ticks left until the AI reconsiders its paddle.
    ai_wait: u32,
    phase: Phase,
    store: ScoreStore,
    clock: StepClock,
    keymap: Keymap,
}

impl Pong {
    pub fn new() -> Self {
        Self::with_store(ScoreStore::load(GameId::Pong))
    }

    fn with_store(store: ScoreStore) -> Self {
        Self {
            player_y: (FIELD_H - PADDLE_H) / 2.0,
            ai_y: (FIELD_H - PADDLE_H) / 2.0,
            ball_x: FIELD_W / 2.0,
            ball_y: FIELD_H / 2.0,
            ball_vx: 0.0,
            ball_vy: 0.0,
            player_score: 0,
            ai_score: 0,
            difficulty: Difficulty::Easy,
            steer: None,
            ai_wait: 0,
            phase: Phase::Menu,
            store,
            clock: StepClock::new(STEP_MS),
            keymap: Keymap::dpad(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.player_score, self.ai_score)
    }

    pub fn high_score(&self) -> u32 {
        self.store.best()
    }

    fn start(&mut self, rng: &mut impl Rng) {
        self.player_y = (FIELD_H - PADDLE_H) / 2.0;
        self.ai_y = (FIELD_H - PADDLE_H) / 2.0;
        self.player_score = 0;
        self.ai_score = 0;
        self.steer = None;
        self.ai_wait = 0;
        self.reset_ball(rng);
        self.phase = Phase::Playing;
        self.clock.start();
    }

    fn to_menu(&mut self) {
        self.clock.stop();
        self.player_score = 0;
        self.ai_score = 0;
        self.steer = None;
        self.ball_x = FIELD_W / 2.0;
        self.ball_y = FIELD_H / 2.0;
        self.ball_vx = 0.0;
        self.ball_vy = 0.0;
        self.phase = Phase::Menu;
    }

    fn reset_ball(&mut self, rng: &mut impl Rng) {
        self.ball_x = FIELD_W / 2.0;
        self.ball_y = FIELD_H / 2.0;
        let (vx, vy) = serve_velocity(rng);
        self.ball_vx = vx;
        self.ball_vy = vy;
    }

    fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::Pause => match self.phase {
                Phase::Playing => {
                    self.clock.stop();
                    self.phase = Phase::Paused;
                }
                Phase::Paused => {
                    self.clock.start();
                    self.phase = Phase::Playing;
                }
                _ => {}
            },
            Command::Start => {
                if matches!(self.phase, Phase::Menu | Phase::GameOver) {
                    let mut rng = rand::thread_rng();
                    self.start(&mut rng);
                }
            }
            Command::Reset => self.to_menu(),
            Command::Up => {
                if self.phase == Phase::Playing {
                    self.steer = Some(Steer::Up);
                }
            }
            Command::Down => {
                if self.phase == Phase::Playing {
                    self.steer = Some(Steer::Down);
                }
            }
            // On the menu screen the horizontal keys pick the difficulty,
            // standing in for the original's difficulty buttons.
            Command::Left => {
                if self.phase == Phase::Menu {
                    self.difficulty = self.difficulty.prev();
                }
            }
            Command::Right => {
                if self.phase == Phase::Menu {
                    self.difficulty = self.difficulty.next();
                }
            }
            Command::Rotate => {}
        }
    }

    fn tick(&mut self, rng: &mut impl Rng) {
        // 1. Player paddle from the buffered steer
        if let Some(steer) = self.steer.take() {
            let dy = match steer {
                Steer::Up => -PLAYER_STEP,
                Steer::Down => PLAYER_STEP,
            };
            self.player_y = (self.player_y + dy).clamp(0.0, FIELD_H - PADDLE_H);
        }

        // 2. AI paddle: sees only the ball's position, never its velocity,
        // and only reconsiders when its reaction delay has run out.
        if self.ai_wait > 0 {
            self.ai_wait -= 1;
        } else {
            self.ai_wait = self.difficulty.reaction_ticks() - 1;
            let delta = ai_paddle_delta(self.ball_y, self.ai_y + PADDLE_H / 2.0, self.difficulty);
            self.ai_y = (self.ai_y + delta).clamp(0.0, FIELD_H - PADDLE_H);
        }

        // 3. Ball
        self.ball_x += self.ball_vx;
        self.ball_y += self.ball_vy;

        if self.ball_y <= BALL_R {
            self.ball_y = BALL_R;
            self.ball_vy = self.ball_vy.abs();
        }
        if self.ball_y >= FIELD_H - BALL_R {
            self.ball_y = FIELD_H - BALL_R;
            self.ball_vy = -self.ball_vy.abs();
        }

        if self.ball_vx < 0.0
            && self.ball_x - BALL_R <= PLAYER_X + PADDLE_W
            && self.ball_x - BALL_R >= PLAYER_X - PADDLE_W
            && self.ball_y >= self.player_y - BALL_R
            && self.ball_y <= self.player_y + PADDLE_H + BALL_R
        {
            self.bounce_off(self.player_y);
            self.ball_x = PLAYER_X + PADDLE_W + BALL_R;
        }
        if self.ball_vx > 0.0
            && self.ball_x + BALL_R >= AI_X
            && self.ball_x + BALL_R <= AI_X + 2.0 * PADDLE_W
            && self.ball_y >= self.ai_y - BALL_R
            && self.ball_y <= self.ai_y + PADDLE_H + BALL_R
        {
            self.bounce_off(self.ai_y);
            self.ball_x = AI_X - BALL_R;
        }

        // 4. Exits award a point and re-serve
        if self.ball_x < 0.0 {
            self.ai_score += 1;
            self.after_point(rng);
        } else if self.ball_x > FIELD_W {
            self.player_score += 1;
            self.after_point(rng);
        }
    }

    /// Flip the horizontal velocity with a capped speed-up and deflect the
    /// vertical component by the contact point; edge hits deflect more.
    fn bounce_off(&mut self, paddle_y: f32) {
        let contact = ((self.ball_y - (paddle_y + PADDLE_H / 2.0)) / (PADDLE_H / 2.0)).clamp(-1.0, 1.0);
        self.ball_vx = (-self.ball_vx * SPEEDUP).clamp(-MAX_VX, MAX_VX);
        self.ball_vy = contact * DEFLECT_VY;
    }

    fn after_point(&mut self, rng: &mut impl Rng) {
        if self.player_score >= WINNING_SCORE || self.ai_score >= WINNING_SCORE {
            self.clock.stop();
            self.phase = Phase::GameOver;
            if self.player_score >= WINNING_SCORE {
                self.store.record(self.player_score);
            }
        } else {
            self.reset_ball(rng);
        }
    }

    fn render_field(&self, width: usize, height: usize) -> Vec<Line<'static>> {
        if width == 0 || height == 0 {
            return Vec::new();
        }
        let bg = Color::Rgb(8, 8, 16);
        let sx = width as f32 / FIELD_W;
        let sy = height as f32 / FIELD_H;

        let mut grid: Vec<Vec<(char, Style)>> =
            vec![vec![(' ', Style::default().bg(bg)); width]; height];

        // Center line
        let mid = width / 2;
        for y in (0..height).step_by(2) {
            if mid < width {
                grid[y][mid] = ('╎', Style::default().fg(Color::Rgb(60, 60, 80)).bg(bg));
            }
        }

        let draw_paddle = |px: f32, py: f32, color: Color, grid: &mut Vec<Vec<(char, Style)>>| {
            let gx = (px * sx) as usize;
            let top = (py * sy) as usize;
            let bottom = ((py + PADDLE_H) * sy) as usize;
            for gy in top..=bottom.min(height.saturating_sub(1)) {
                if gx < width {
                    grid[gy][gx] = ('█', Style::default().fg(color).bg(bg).add_modifier(Modifier::BOLD));
                }
            }
        };
        draw_paddle(PLAYER_X, self.player_y, Color::Rgb(90, 210, 110), &mut grid);
        draw_paddle(AI_X + PADDLE_W, self.ai_y, Color::Rgb(230, 110, 90), &mut grid);

        let bx = (self.ball_x * sx) as usize;
        let by = (self.ball_y * sy) as usize;
        if bx < width && by < height {
            grid[by][bx] = ('●', Style::default().fg(Color::White).bg(bg).add_modifier(Modifier::BOLD));
        }

        grid.into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Game for Pong {
    fn update(&mut self) {
        if self.clock.advance(FRAME_MS) {
            let mut rng = rand::thread_rng();
            self.tick(&mut rng);
        }
    }

    fn handle_input(&mut self, key: KeyEvent) {
        if let Some(cmd) = self.keymap.command(key) {
            self.apply(cmd);
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(200, 160, 70)))
            .title(" 🏓 Pong ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(240, 200, 90))
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(inner);

        let status = Line::from(vec![
            Span::styled(
                format!(" You {} : {} AI ", self.player_score, self.ai_score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("First to {} ", WINNING_SCORE),
                Style::default().fg(Color::Green),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} ", self.difficulty.label()),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("🏆 Best: {} ", self.store.best()),
                Style::default().fg(Color::Cyan),
            ),
        ]);
        frame.render_widget(Paragraph::new(status), rows[0]);

        let lines = self.render_field(rows[1].width as usize, rows[1].height as usize);
        frame.render_widget(Paragraph::new(lines), rows[1]);

        let help = match self.phase {
            Phase::Menu => Line::from(vec![
                Span::styled(" ENTER Start ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("│ ◀ {} ▶ difficulty │ ↑↓/WS Move │ SPACE/P Pause │ Esc Home", self.difficulty.label()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Phase::Paused => Line::from(vec![
                Span::styled(" ⏸ PAUSED - SPACE/P to resume ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            ]),
            Phase::GameOver => {
                let verdict = if self.player_score >= WINNING_SCORE {
                    "🎉 You win!"
                } else {
                    "💀 AI wins!"
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {verdict} "),
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!(
                            "{} : {} │ ENTER Rematch │ R Menu",
                            self.player_score, self.ai_score
                        ),
                        Style::default().fg(Color::Gray),
                    ),
                ])
            }
            Phase::Playing => Line::from(vec![
                Span::styled(" ↑↓/WS Move ", Style::default().fg(Color::DarkGray)),
                Span::styled("│ SPACE/P Pause │ R Menu │ Esc Home", Style::default().fg(Color::DarkGray)),
            ]),
        };
        frame.render_widget(Paragraph::new(help), rows[2]);
    }

    fn reset(&mut self) {
        self.to_menu();
    }

    fn get_score(&self) -> u32 {
        self.player_score
    }

    fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

/// The AI's whole view of the world: ball height, own paddle center,
/// difficulty. Returns the vertical move for this tick, zero inside the
/// dead-zone and capped at the difficulty's speed.
fn ai_paddle_delta(ball_y: f32, paddle_center: f32, difficulty: Difficulty) -> f32 {
    let gap = ball_y - paddle_center;
    if gap.abs() <= difficulty.dead_zone() {
        return 0.0;
    }
    gap.clamp(-difficulty.ai_speed(), difficulty.ai_speed())
}

/// Serve with a horizontal speed in a fixed range, random side, and a mild
/// random vertical component.
fn serve_velocity(rng: &mut impl Rng) -> (f32, f32) {
    let vx = rng.gen_range(SERVE_VX_MIN..SERVE_VX_MAX);
    let vx = if rng.gen_bool(0.5) { vx } else { -vx };
    let vy = rng.gen_range(-SERVE_VY_MAX..SERVE_VY_MAX);
    (vx, vy)
}

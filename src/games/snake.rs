use std::collections::VecDeque;

use crossterm::event::KeyEvent;
use rand::Rng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::clock::StepClock;
use crate::event::FRAME_MS;
use crate::games::Game;
use crate::input::{Command, Keymap};
use crate::scores::{GameId, ScoreStore};

const GRID_SIZE: i32 = 20;
const STEP_MS: u64 = 150;
const FOOD_POINTS: u32 = 10;
const START_CELL: Cell = Cell { x: 10, y: 10 };
const START_FOOD: Cell = Cell { x: 15, y: 15 };

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

pub struct Snake {
    body: VecDeque<Cell>,
    /// Direction of the last actual move; reversal checks run against this.
    heading: Direction,
    /// Latest legal steer since the last step; consumed by the next step.
    pending: Direction,
    food: Cell,
    phase: Phase,
    score: u32,
    store: ScoreStore,
    clock: StepClock,
    keymap: Keymap,
}

impl Snake {
    pub fn new() -> Self {
        Self::with_store(ScoreStore::load(GameId::Snake))
    }

    fn with_store(store: ScoreStore) -> Self {
        Self {
            body: VecDeque::from([START_CELL]),
            heading: Direction::Right,
            pending: Direction::Right,
            food: START_FOOD,
            phase: Phase::Menu,
            score: 0,
            store,
            clock: StepClock::new(STEP_MS),
            keymap: Keymap::dpad(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn high_score(&self) -> u32 {
        self.store.best()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    fn start(&mut self) {
        self.body = VecDeque::from([START_CELL]);
        self.heading = Direction::Right;
        self.pending = Direction::Right;
        self.score = 0;
        let mut rng = rand::thread_rng();
        self.food = spawn_food(&self.body, &mut rng).unwrap_or(START_FOOD);
        self.phase = Phase::Playing;
        self.clock.start();
    }

    fn to_menu(&mut self) {
        self.clock.stop();
        self.body = VecDeque::from([START_CELL]);
        self.heading = Direction::Right;
        self.pending = Direction::Right;
        self.food = START_FOOD;
        self.score = 0;
        self.phase = Phase::Menu;
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
                    self.start();
                }
            }
            Command::Reset => self.to_menu(),
            Command::Up => self.steer(Direction::Up),
            Command::Down => self.steer(Direction::Down),
            Command::Left => self.steer(Direction::Left),
            Command::Right => self.steer(Direction::Right),
            Command::Rotate => {}
        }
    }

    /// Steers are applied as they arrive, latest legal one wins. Reversing the
    /// direction of actual motion is rejected while the snake has a body to
    /// run into.
    fn steer(&mut self, dir: Direction) {
        if self.phase != Phase::Playing {
            return;
        }
        if self.body.len() > 1 && dir == self.heading.opposite() {
            return;
        }
        self.pending = dir;
    }

    fn step(&mut self, rng: &mut impl Rng) {
        self.heading = self.pending;
        let (dx, dy) = self.heading.delta();
        let head = self.body[0];
        let next = Cell {
            x: head.x + dx,
            y: head.y + dy,
        };

        if next.x < 0 || next.x >= GRID_SIZE || next.y < 0 || next.y >= GRID_SIZE {
            self.game_over();
            return;
        }

        let eats = next == self.food;
        // The tail cell is vacated this step when nothing is eaten, so a head
        // move onto it is legal.
        let occupied = self
            .body
            .iter()
            .take(if eats { self.body.len() } else { self.body.len() - 1 })
            .any(|&c| c == next);
        if occupied {
            self.game_over();
            return;
        }

        self.body.push_front(next);
        if eats {
            self.score += FOOD_POINTS;
            self.store.record(self.score);
            match spawn_food(&self.body, rng) {
                Some(food) => self.food = food,
                // Board full: nowhere left to grow.
                None => self.game_over(),
            }
        } else {
            self.body.pop_back();
        }
    }

    fn game_over(&mut self) {
        self.clock.stop();
        self.phase = Phase::GameOver;
        self.store.record(self.score);
    }

    fn render_field(&self, width: usize, height: usize) -> Vec<Line<'static>> {
        let bg = Color::Rgb(10, 14, 10);
        let cell_w = 2usize;
        let grid_w = GRID_SIZE as usize * cell_w;
        let grid_h = GRID_SIZE as usize;
        let off_x = width.saturating_sub(grid_w) / 2;
        let off_y = height.saturating_sub(grid_h) / 2;

        let mut grid: Vec<Vec<(char, Style)>> =
            vec![vec![(' ', Style::default().bg(bg)); width]; height];

        let put = |cx: i32, cy: i32, ch: char, style: Style, grid: &mut Vec<Vec<(char, Style)>>| {
            let gy = off_y + cy as usize;
            for i in 0..cell_w {
                let gx = off_x + cx as usize * cell_w + i;
                if gy < height && gx < width {
                    grid[gy][gx] = (ch, style);
                }
            }
        };

        // Checkerboard backdrop so the playfield reads as a grid
        for cy in 0..GRID_SIZE {
            for cx in 0..GRID_SIZE {
                if (cx + cy) % 2 == 0 {
                    put(cx, cy, ' ', Style::default().bg(Color::Rgb(16, 22, 16)), &mut grid);
                }
            }
        }

        for (i, &seg) in self.body.iter().enumerate() {
            let style = if i == 0 {
                Style::default().fg(Color::Rgb(90, 230, 90)).bg(bg)
            } else {
                Style::default().fg(Color::Rgb(50, 170, 50)).bg(bg)
            };
            put(seg.x, seg.y, '█', style, &mut grid);
        }

        put(
            self.food.x,
            self.food.y,
            '●',
            Style::default()
                .fg(Color::Rgb(230, 70, 70))
                .bg(bg)
                .add_modifier(Modifier::BOLD),
            &mut grid,
        );

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

impl Game for Snake {
    fn update(&mut self) {
        if self.clock.advance(FRAME_MS) {
            let mut rng = rand::thread_rng();
            self.step(&mut rng);
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
            .border_style(Style::default().fg(Color::Rgb(80, 200, 80)))
            .title(" 🐍 Snake ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(120, 230, 120))
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(inner);

        let status = Line::from(vec![
            Span::styled(
                format!(" Score: {} ", self.score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("🏆 Best: {} ", self.store.best()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Length: {} ", self.body.len()),
                Style::default().fg(Color::Green),
            ),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        let lines = self.render_field(chunks[1].width as usize, chunks[1].height as usize);
        frame.render_widget(Paragraph::new(lines), chunks[1]);

        let help = match self.phase {
            Phase::Menu => Line::from(vec![
                Span::styled(" ENTER Start ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled("│ ↑↓←→/WASD Move │ SPACE/P Pause │ Esc Home", Style::default().fg(Color::DarkGray)),
            ]),
            Phase::Paused => Line::from(vec![
                Span::styled(" ⏸ PAUSED - SPACE/P to resume ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            ]),
            Phase::GameOver => {
                let flourish = if self.score > 0 && self.score == self.store.best() {
                    " 🏆 New high score!"
                } else {
                    ""
                };
                Line::from(vec![
                    Span::styled(" 💀 GAME OVER! ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!("Score: {}{} │ ENTER Restart │ R Menu", self.score, flourish),
                        Style::default().fg(Color::Gray),
                    ),
                ])
            }
            Phase::Playing => Line::from(vec![
                Span::styled(" ↑↓←→/WASD Move ", Style::default().fg(Color::DarkGray)),
                Span::styled("│ SPACE/P Pause │ R Menu │ Esc Home", Style::default().fg(Color::DarkGray)),
            ]),
        };
        frame.render_widget(Paragraph::new(help), chunks[2]);
    }

    fn reset(&mut self) {
        self.to_menu();
    }

    fn get_score(&self) -> u32 {
        self.score
    }

    fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

/// Uniform choice over the free cells, None when the snake fills the board.
fn spawn_food(body: &VecDeque<Cell>, rng: &mut impl Rng) -> Option<Cell> {
    let mut free = Vec::with_capacity((GRID_SIZE * GRID_SIZE) as usize - body.len());
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            let cell = Cell { x, y };
            if !body.contains(&cell) {
                free.push(cell);
            }
        }
    }
    if free.is_empty() {
        None
    } else {
        Some(free[rng.gen_range(0..free.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_game() -> Snake {
        let dir = std::env::temp_dir().join(format!("retrocade-snake-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut game = Snake::with_store(ScoreStore::load_in(&dir, GameId::Snake));
        game.start();
        game
    }

    #[test]
    fn moves_one_cell_in_heading() {
        let mut game = test_game();
        game.food = Cell { x: 0, y: 0 };
        let mut rng = StdRng::seed_from_u64(1);
        game.step(&mut rng);
        assert_eq!(game.body[0], Cell { x: 11, y: 10 });
        assert_eq!(game.len(), 1);
        assert_eq!(game.phase(), Phase::Playing);
    }

    #[test]
    fn grows_by_one_and_scores_on_food() {
        let mut game = test_game();
        game.food = Cell { x: 11, y: 10 };
        let mut rng = StdRng::seed_from_u64(1);
        let len = game.len();
        game.step(&mut rng);
        assert_eq!(game.len(), len + 1);
        assert_eq!(game.get_score(), FOOD_POINTS);
        // Regenerated food never lands on the body
        assert!(!game.body.contains(&game.food));
    }

    #[test]
    fn wall_hit_ends_the_game() {
        let mut game = test_game();
        game.body = VecDeque::from([Cell { x: GRID_SIZE - 1, y: 5 }]);
        let mut rng = StdRng::seed_from_u64(1);
        game.step(&mut rng);
        assert_eq!(game.phase(), Phase::GameOver);
        assert!(!game.clock.is_running());
    }

    #[test]
    fn self_collision_ends_the_game() {
        let mut game = test_game();
        // Heading right into its own second segment
        game.body = VecDeque::from([
            Cell { x: 5, y: 5 },
            Cell { x: 5, y: 6 },
            Cell { x: 6, y: 6 },
            Cell { x: 6, y: 5 },
            Cell { x: 7, y: 5 },
        ]);
        game.heading = Direction::Down;
        game.pending = Direction::Down;
        game.food = Cell { x: 0, y: 0 };
        let mut rng = StdRng::seed_from_u64(1);
        game.step(&mut rng);
        assert_eq!(game.phase(), Phase::GameOver);
    }

    #[test]
    fn moving_onto_vacating_tail_is_legal() {
        let mut game = test_game();
        // A 2x2 loop: the head moves onto the tail cell, which empties this
        // same step because nothing is eaten.
        game.body = VecDeque::from([
            Cell { x: 5, y: 5 },
            Cell { x: 6, y: 5 },
            Cell { x: 6, y: 6 },
            Cell { x: 5, y: 6 },
        ]);
        game.heading = Direction::Down;
        game.pending = Direction::Down;
        game.food = Cell { x: 0, y: 0 };
        let mut rng = StdRng::seed_from_u64(1);
        game.step(&mut rng);
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.body[0], Cell { x: 5, y: 6 });
        assert_eq!(game.len(), 4);
    }

    #[test]
    fn reversal_is_rejected_while_snake_has_a_body() {
        let mut game = test_game();
        game.body = VecDeque::from([Cell { x: 5, y: 5 }, Cell { x: 4, y: 5 }]);
        game.heading = Direction::Right;
        game.pending = Direction::Right;
        game.steer(Direction::Left);
        assert_eq!(game.pending, Direction::Right);
    }

    #[test]
    fn reversal_is_allowed_at_length_one() {
        let mut game = test_game();
        assert_eq!(game.len(), 1);
        game.steer(Direction::Left);
        assert_eq!(game.pending, Direction::Left);
    }

    #[test]
    fn latest_legal_steer_before_a_step_wins() {
        let mut game = test_game();
        game.body = VecDeque::from([Cell { x: 5, y: 5 }, Cell { x: 4, y: 5 }]);
        game.heading = Direction::Right;
        game.pending = Direction::Right;
        game.steer(Direction::Up);
        // Left is still the reverse of the motion in flight; it must not
        // override the queued Up.
        game.steer(Direction::Left);
        assert_eq!(game.pending, Direction::Up);
        game.food = Cell { x: 0, y: 0 };
        let mut rng = StdRng::seed_from_u64(1);
        game.step(&mut rng);
        assert_eq!(game.body[0], Cell { x: 5, y: 4 });
    }

    #[test]
    fn steers_are_dropped_outside_playing() {
        let mut game = test_game();
        game.apply(Command::Pause);
        assert_eq!(game.phase(), Phase::Paused);
        game.steer(Direction::Down);
        assert_eq!(game.pending, Direction::Right);
    }

    #[test]
    fn pause_stops_the_clock() {
        let mut game = test_game();
        game.apply(Command::Pause);
        for _ in 0..100 {
            game.update();
        }
        assert_eq!(game.body[0], START_CELL);
        game.apply(Command::Pause);
        assert_eq!(game.phase(), Phase::Playing);
    }

    #[test]
    fn game_over_records_best_score() {
        let mut game = test_game();
        game.score = 40;
        game.body = VecDeque::from([Cell { x: 0, y: 0 }]);
        game.heading = Direction::Left;
        game.pending = Direction::Left;
        let mut rng = StdRng::seed_from_u64(1);
        game.step(&mut rng);
        assert!(game.high_score() >= 40);
    }

    proptest! {
        // len(snake) == previous_len + (1 if ate else 0) over any run of steps
        #[test]
        fn length_grows_only_on_food(seed in 0u64..1000, steps in 1usize..200) {
            let mut game = test_game();
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..steps {
                if game.phase() != Phase::Playing {
                    break;
                }
                let before = game.len();
                // Wander deterministically from the seed
                let dir = match rng.gen_range(0..4) {
                    0 => Direction::Up,
                    1 => Direction::Down,
                    2 => Direction::Left,
                    _ => Direction::Right,
                };
                game.steer(dir);
                let eats = {
                    let (dx, dy) = game.pending.delta();
                    let head = game.body[0];
                    Cell { x: head.x + dx, y: head.y + dy } == game.food
                };
                game.step(&mut rng);
                if game.phase() == Phase::Playing {
                    prop_assert_eq!(game.len(), before + usize::from(eats));
                    prop_assert!(!game.body.contains(&game.food));
                }
            }
        }
    }
}

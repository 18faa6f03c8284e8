use crossterm::event::KeyEvent;
use rand::Rng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::clock::StepClock;
use crate::event::FRAME_MS;
use crate::games::Game;
use crate::input::{Command, Keymap};
use crate::scores::{GameId, ScoreStore};

pub const BOARD_WIDTH: i32 = 10;
pub const BOARD_HEIGHT: i32 = 20;
const INITIAL_DROP_MS: u64 = 800;
const DROP_FLOOR_MS: u64 = 50;
const LINES_PER_LEVEL: u32 = 10;
// Points per lines cleared in one lock, multiplied by the level
const LINE_POINTS: [u32; 5] = [0, 100, 300, 500, 800];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    fn cells(&self) -> Vec<Vec<u8>> {
        match self {
            PieceKind::I => vec![
                vec![0, 0, 0, 0],
                vec![1, 1, 1, 1],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
            ],
            PieceKind::O => vec![vec![1, 1], vec![1, 1]],
            PieceKind::T => vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 0, 0]],
            PieceKind::S => vec![vec![0, 1, 1], vec![1, 1, 0], vec![0, 0, 0]],
            PieceKind::Z => vec![vec![1, 1, 0], vec![0, 1, 1], vec![0, 0, 0]],
            PieceKind::J => vec![vec![1, 0, 0], vec![1, 1, 1], vec![0, 0, 0]],
            PieceKind::L => vec![vec![0, 0, 1], vec![1, 1, 1], vec![0, 0, 0]],
        }
    }

    fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Rgb(60, 200, 220),
            PieceKind::O => Color::Rgb(230, 210, 60),
            PieceKind::T => Color::Rgb(170, 80, 220),
            PieceKind::S => Color::Rgb(80, 210, 90),
            PieceKind::Z => Color::Rgb(230, 70, 70),
            PieceKind::J => Color::Rgb(70, 110, 230),
            PieceKind::L => Color::Rgb(235, 150, 50),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Piece {
    kind: PieceKind,
    cells: Vec<Vec<u8>>,
    x: i32,
    y: i32,
}

impl Piece {
    fn spawn(kind: PieceKind) -> Self {
        let cells = kind.cells();
        let width = cells[0].len() as i32;
        Piece {
            kind,
            cells,
            x: BOARD_WIDTH / 2 - width / 2,
            y: 0,
        }
    }

    /// Clockwise quarter turn: transpose, then reverse each row.
    fn rotated(&self) -> Piece {
        let n = self.cells.len();
        let m = self.cells[0].len();
        let mut cells = vec![vec![0u8; n]; m];
        for (i, row) in cells.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.cells[n - 1 - j][i];
            }
        }
        Piece {
            kind: self.kind,
            cells,
            x: self.x,
            y: self.y,
        }
    }

    fn offset(&self, dx: i32, dy: i32) -> Piece {
        Piece {
            kind: self.kind,
            cells: self.cells.clone(),
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

type Board = Vec<Vec<Option<PieceKind>>>;

pub struct Tetris {
    board: Board,
    current: Option<Piece>,
    next: Option<Piece>,
    phase: Phase,
    score: u32,
    lines: u32,
    level: u32,
    store: ScoreStore,
    clock: StepClock,
    keymap: Keymap,
}

impl Tetris {
    pub fn new() -> Self {
        Self::with_store(ScoreStore::load(GameId::Tetris))
    }

    fn with_store(store: ScoreStore) -> Self {
        Self {
            board: empty_board(),
            current: None,
            next: None,
            phase: Phase::Menu,
            score: 0,
            lines: 0,
            level: 1,
            store,
            clock: StepClock::new(INITIAL_DROP_MS),
            keymap: Keymap::tetris(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn high_score(&self) -> u32 {
        self.store.best()
    }

    fn start(&mut self) {
        self.board = empty_board();
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.phase = Phase::Playing;
        self.clock = StepClock::new(INITIAL_DROP_MS);
        self.clock.start();
        let mut rng = rand::thread_rng();
        self.next = Some(Piece::spawn(random_kind(&mut rng)));
        self.spawn_next(&mut rng);
    }

    fn to_menu(&mut self) {
        self.clock.stop();
        self.board = empty_board();
        self.current = None;
        self.next = None;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.phase = Phase::Menu;
    }

    /// Promote the pending piece to current and draw a fresh pending one.
    /// A blocked spawn position ends the game.
    fn spawn_next(&mut self, rng: &mut impl Rng) {
        let piece = self
            .next
            .take()
            .unwrap_or_else(|| Piece::spawn(random_kind(rng)));
        self.next = Some(Piece::spawn(random_kind(rng)));
        let blocked = !fits(&piece, &self.board);
        self.current = Some(piece);
        if blocked {
            self.game_over();
        }
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
            Command::Left => {
                self.try_move(-1, 0);
            }
            Command::Right => {
                self.try_move(1, 0);
            }
            Command::Down => {
                // Soft drop shares the gravity path
                if self.phase == Phase::Playing {
                    let mut rng = rand::thread_rng();
                    self.drop_one(&mut rng);
                }
            }
            Command::Rotate => self.try_rotate(),
            Command::Up => {}
        }
    }

    /// Translate the current piece, rejecting any move that leaves the board
    /// or overlaps locked cells. Returns whether the move applied.
    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(piece) = &self.current else {
            return false;
        };
        let moved = piece.offset(dx, dy);
        if fits(&moved, &self.board) {
            self.current = Some(moved);
            true
        } else {
            false
        }
    }

    /// Rotation is all-or-nothing: no wall kick, an illegal result is
    /// discarded.
    fn try_rotate(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        let Some(piece) = &self.current else { return };
        let rotated = piece.rotated();
        if fits(&rotated, &self.board) {
            self.current = Some(rotated);
        }
    }

    /// One gravity step: move down, or lock, clear lines, score and respawn.
    fn drop_one(&mut self, rng: &mut impl Rng) {
        if self.try_move(0, 1) {
            return;
        }
        if self.phase != Phase::Playing {
            return;
        }
        let Some(piece) = self.current.take() else {
            return;
        };
        lock(&piece, &mut self.board);
        let cleared = clear_lines(&mut self.board);
        if cleared > 0 {
            self.score += LINE_POINTS[cleared.min(4) as usize] * self.level;
            self.store.record(self.score);
            self.lines += cleared;
            self.level = self.lines / LINES_PER_LEVEL + 1;
            self.clock.set_interval(drop_interval_ms(self.level));
        }
        self.spawn_next(rng);
    }

    fn game_over(&mut self) {
        self.clock.stop();
        self.phase = Phase::GameOver;
        self.store.record(self.score);
    }

    fn cell_at(&self, x: i32, y: i32) -> Option<PieceKind> {
        if let Some(piece) = &self.current {
            let px = x - piece.x;
            let py = y - piece.y;
            if py >= 0
                && (py as usize) < piece.cells.len()
                && px >= 0
                && (px as usize) < piece.cells[0].len()
                && piece.cells[py as usize][px as usize] != 0
            {
                return Some(piece.kind);
            }
        }
        if y >= 0 && y < BOARD_HEIGHT && x >= 0 && x < BOARD_WIDTH {
            return self.board[y as usize][x as usize];
        }
        None
    }

    fn render_board(&self, width: usize, height: usize) -> Vec<Line<'static>> {
        let bg = Color::Rgb(12, 12, 20);
        let cell_w = 2usize;
        let grid_w = BOARD_WIDTH as usize * cell_w + 2;
        let grid_h = BOARD_HEIGHT as usize;
        let off_x = width.saturating_sub(grid_w) / 2;
        let off_y = height.saturating_sub(grid_h) / 2;

        let mut grid: Vec<Vec<(char, Style)>> =
            vec![vec![(' ', Style::default().bg(bg)); width]; height];

        let wall = Style::default().fg(Color::Rgb(70, 70, 95)).bg(bg);
        for by in 0..BOARD_HEIGHT as usize {
            let gy = off_y + by;
            if gy >= height {
                continue;
            }
            if off_x < width {
                grid[gy][off_x] = ('│', wall);
            }
            let right = off_x + grid_w - 1;
            if right < width {
                grid[gy][right] = ('│', wall);
            }
            for bx in 0..BOARD_WIDTH {
                let kind = self.cell_at(bx, by as i32);
                for i in 0..cell_w {
                    let gx = off_x + 1 + bx as usize * cell_w + i;
                    if gx >= width {
                        continue;
                    }
                    grid[gy][gx] = match kind {
                        Some(k) => ('█', Style::default().fg(k.color()).bg(bg)),
                        None => (if i == 0 { '·' } else { ' ' }, Style::default().fg(Color::Rgb(30, 30, 45)).bg(bg)),
                    };
                }
            }
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

    fn render_preview(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            " Next",
            Style::default().fg(Color::Gray),
        ))];
        if let Some(next) = &self.next {
            for row in &next.cells {
                let mut spans = vec![Span::raw(" ")];
                for &c in row {
                    if c != 0 {
                        spans.push(Span::styled("██", Style::default().fg(next.kind.color())));
                    } else {
                        spans.push(Span::raw("  "));
                    }
                }
                lines.push(Line::from(spans));
            }
        }
        lines
    }
}

impl Game for Tetris {
    fn update(&mut self) {
        if self.clock.advance(FRAME_MS) {
            let mut rng = rand::thread_rng();
            self.drop_one(&mut rng);
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
            .border_style(Style::default().fg(Color::Rgb(90, 130, 230)))
            .title(" 🧩 Tetris ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(120, 160, 255))
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
                format!("Lines: {} ", self.lines),
                Style::default().fg(Color::Green),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Level: {} ", self.level),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(status), rows[0]);

        let cols = Layout::horizontal([Constraint::Min(24), Constraint::Length(12)]).split(rows[1]);
        let lines = self.render_board(cols[0].width as usize, cols[0].height as usize);
        frame.render_widget(Paragraph::new(lines), cols[0]);
        frame.render_widget(Paragraph::new(self.render_preview()), cols[1]);

        let help = match self.phase {
            Phase::Menu => Line::from(vec![
                Span::styled(" ENTER Start ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled("│ ←→ Move │ ↑/SPACE Rotate │ ↓ Drop │ P Pause │ Esc Home", Style::default().fg(Color::DarkGray)),
            ]),
            Phase::Paused => Line::from(vec![
                Span::styled(" ⏸ PAUSED - P to resume ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
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
                Span::styled(" ←→ Move │ ↑/SPACE Rotate │ ↓ Drop │ P Pause │ R Menu", Style::default().fg(Color::DarkGray)),
            ]),
        };
        frame.render_widget(Paragraph::new(help), rows[2]);
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

fn empty_board() -> Board {
    vec![vec![None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]
}

fn random_kind(rng: &mut impl Rng) -> PieceKind {
    PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())]
}

/// Level-scaled gravity interval, floored so high levels stay playable.
fn drop_interval_ms(level: u32) -> u64 {
    INITIAL_DROP_MS
        .saturating_sub((level.saturating_sub(1) as u64) * 50)
        .max(DROP_FLOOR_MS)
}

/// Bounds and overlap check shared by move, rotate and spawn. Cells above the
/// top edge are legal; they only matter once the piece drops into view.
fn fits(piece: &Piece, board: &Board) -> bool {
    for (row_idx, row) in piece.cells.iter().enumerate() {
        for (col_idx, &cell) in row.iter().enumerate() {
            if cell == 0 {
                continue;
            }
            let x = piece.x + col_idx as i32;
            let y = piece.y + row_idx as i32;
            if x < 0 || x >= BOARD_WIDTH || y >= BOARD_HEIGHT {
                return false;
            }
            if y >= 0 && board[y as usize][x as usize].is_some() {
                return false;
            }
        }
    }
    true
}

/// Freeze the piece's cells into the board. Cells still above the top edge
/// are dropped; the spawn-collision check decides game over, not this.
fn lock(piece: &Piece, board: &mut Board) {
    for (row_idx, row) in piece.cells.iter().enumerate() {
        for (col_idx, &cell) in row.iter().enumerate() {
            if cell == 0 {
                continue;
            }
            let x = piece.x + col_idx as i32;
            let y = piece.y + row_idx as i32;
            if y >= 0 && y < BOARD_HEIGHT && x >= 0 && x < BOARD_WIDTH {
                board[y as usize][x as usize] = Some(piece.kind);
            }
        }
    }
}

/// Remove full rows, keeping the relative order of the rest and refilling
/// from the top. Returns the number of rows removed.
fn clear_lines(board: &mut Board) -> u32 {
    board.retain(|row| row.iter().any(|cell| cell.is_none()));
    let cleared = BOARD_HEIGHT as usize - board.len();
    for _ in 0..cleared {
        board.insert(0, vec![None; BOARD_WIDTH as usize]);
    }
    cleared as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_game() -> Tetris {
        let dir = std::env::temp_dir().join(format!("retrocade-tetris-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut game = Tetris::with_store(ScoreStore::load_in(&dir, GameId::Tetris));
        game.phase = Phase::Playing;
        game.clock.start();
        game
    }

    fn piece_at(kind: PieceKind, x: i32, y: i32) -> Piece {
        let mut piece = Piece::spawn(kind);
        piece.x = x;
        piece.y = y;
        piece
    }

    #[test]
    fn rotation_is_clockwise() {
        let piece = piece_at(PieceKind::J, 3, 3);
        let rotated = piece.rotated();
        // J: [1,0,0]/[1,1,1]/[0,0,0] turns into [0,1,1]/[0,1,0]/[0,1,0]
        assert_eq!(
            rotated.cells,
            vec![vec![0, 1, 1], vec![0, 1, 0], vec![0, 1, 0]]
        );
    }

    #[test]
    fn four_rotations_are_identity() {
        let piece = piece_at(PieceKind::T, 3, 3);
        let back = piece.rotated().rotated().rotated().rotated();
        assert_eq!(back.cells, piece.cells);
    }

    #[test]
    fn move_into_wall_is_rejected() {
        let mut game = test_game();
        game.current = Some(piece_at(PieceKind::O, 0, 5));
        assert!(!game.try_move(-1, 0));
        assert_eq!(game.current.as_ref().unwrap().x, 0);
        assert!(game.try_move(1, 0));
        assert_eq!(game.current.as_ref().unwrap().x, 1);
    }

    #[test]
    fn move_into_locked_cell_is_rejected() {
        let mut game = test_game();
        game.board[6][4] = Some(PieceKind::L);
        game.current = Some(piece_at(PieceKind::O, 4, 4));
        assert!(!game.try_move(0, 1));
    }

    #[test]
    fn rotation_against_right_wall_is_discarded() {
        let mut game = test_game();
        // Vertical I hugging the right wall; rotating back to horizontal
        // would reach past the edge, so the rotation must be a no-op.
        let mut vertical = piece_at(PieceKind::I, 0, 5).rotated();
        vertical.x = BOARD_WIDTH - 3;
        let cells_before = vertical.cells.clone();
        game.current = Some(vertical);
        game.try_rotate();
        let piece = game.current.as_ref().unwrap();
        assert_eq!(piece.cells, cells_before);
        // No cell may ever sit at x >= BOARD_WIDTH
        for row in &piece.cells {
            for (ci, &c) in row.iter().enumerate() {
                if c != 0 {
                    assert!(piece.x + (ci as i32) < BOARD_WIDTH);
                }
            }
        }
    }

    #[test]
    fn completed_rows_clear_and_keep_order() {
        let mut game = test_game();
        // Rows 5 and 6 full, row 7 partially filled
        for x in 0..BOARD_WIDTH as usize {
            game.board[5][x] = Some(PieceKind::I);
            game.board[6][x] = Some(PieceKind::S);
        }
        game.board[7][3] = Some(PieceKind::T);
        let cleared = clear_lines(&mut game.board);
        assert_eq!(cleared, 2);
        // Two fresh empty rows appear on top; rows below the cleared band
        // keep their position.
        assert!(game.board[0].iter().all(|c| c.is_none()));
        assert!(game.board[1].iter().all(|c| c.is_none()));
        assert_eq!(game.board[7][3], Some(PieceKind::T));
    }

    #[test]
    fn scoring_scales_with_level() {
        let mut game = test_game();
        game.level = 3;
        // Four full rows with a one-column gap the I piece will plug
        for y in 16..20 {
            for x in 1..BOARD_WIDTH as usize {
                game.board[y][x] = Some(PieceKind::J);
            }
        }
        // Vertical I in column 0, resting on the floor
        let vertical = piece_at(PieceKind::I, -2, 15).rotated();
        game.current = Some(Piece { x: -2, y: 16, ..vertical });
        game.next = Some(Piece::spawn(PieceKind::O));
        let mut rng = StdRng::seed_from_u64(7);
        game.drop_one(&mut rng);
        assert_eq!(game.score, 800 * 3);
        assert_eq!(game.lines, 4);
    }

    #[test]
    fn level_up_schedules_faster_drops() {
        let mut game = test_game();
        game.lines = 9;
        for x in 0..BOARD_WIDTH as usize {
            game.board[19][x] = Some(PieceKind::Z);
        }
        game.board[19][0] = None;
        let vertical = piece_at(PieceKind::I, 0, 0).rotated();
        game.current = Some(Piece { x: -2, y: 16, ..vertical });
        game.next = Some(Piece::spawn(PieceKind::O));
        let mut rng = StdRng::seed_from_u64(7);
        game.drop_one(&mut rng);
        assert_eq!(game.lines, 10);
        assert_eq!(game.level, 2);
        assert_eq!(drop_interval_ms(game.level), 750);
    }

    #[test]
    fn drop_interval_never_goes_below_floor() {
        assert_eq!(drop_interval_ms(1), INITIAL_DROP_MS);
        assert_eq!(drop_interval_ms(16), DROP_FLOOR_MS);
        assert_eq!(drop_interval_ms(100), DROP_FLOOR_MS);
    }

    #[test]
    fn blocked_spawn_ends_the_game() {
        let mut game = test_game();
        // Wall off the spawn rows
        for x in 0..BOARD_WIDTH as usize {
            game.board[0][x] = Some(PieceKind::O);
            game.board[1][x] = Some(PieceKind::O);
        }
        game.next = Some(Piece::spawn(PieceKind::T));
        let mut rng = StdRng::seed_from_u64(7);
        game.spawn_next(&mut rng);
        assert_eq!(game.phase(), Phase::GameOver);
        assert!(!game.clock.is_running());
    }

    #[test]
    fn lock_then_respawn_from_next() {
        let mut game = test_game();
        game.current = Some(piece_at(PieceKind::O, 4, 18));
        game.next = Some(Piece::spawn(PieceKind::T));
        let mut rng = StdRng::seed_from_u64(7);
        game.drop_one(&mut rng);
        assert_eq!(game.board[19][4], Some(PieceKind::O));
        assert_eq!(game.board[18][5], Some(PieceKind::O));
        assert_eq!(game.current.as_ref().unwrap().kind, PieceKind::T);
        assert!(game.next.is_some());
    }

    #[test]
    fn no_clear_awards_no_points() {
        let mut game = test_game();
        game.current = Some(piece_at(PieceKind::O, 4, 18));
        game.next = Some(Piece::spawn(PieceKind::T));
        let mut rng = StdRng::seed_from_u64(7);
        game.drop_one(&mut rng);
        assert_eq!(game.score, 0);
        assert_eq!(game.clock.interval_ms(), INITIAL_DROP_MS);
    }

    proptest! {
        // A legal rotation never produces a cell outside the board.
        #[test]
        fn legal_rotation_stays_in_bounds(kind_idx in 0usize..7, x in -2i32..10, y in 0i32..18, turns in 0usize..4) {
            let mut game = test_game();
            let mut piece = Piece::spawn(PieceKind::ALL[kind_idx]);
            piece.x = x;
            piece.y = y;
            prop_assume!(fits(&piece, &game.board));
            game.current = Some(piece);
            for _ in 0..turns {
                game.try_rotate();
            }
            let piece = game.current.as_ref().unwrap();
            for (ri, row) in piece.cells.iter().enumerate() {
                for (ci, &c) in row.iter().enumerate() {
                    if c != 0 {
                        let cx = piece.x + ci as i32;
                        let cy = piece.y + ri as i32;
                        prop_assert!(cx >= 0 && cx < BOARD_WIDTH);
                        prop_assert!(cy < BOARD_HEIGHT);
                    }
                }
            }
        }
    }
}

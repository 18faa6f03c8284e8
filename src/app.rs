use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::games::pong::Pong;
use crate::games::snake::Snake;
use crate::games::tetris::Tetris;
use crate::games::Game;

#[derive(Clone, Copy, PartialEq)]
pub enum Tab {
    Home,
    Snake,
    Tetris,
    Pong,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::Snake, Tab::Tetris, Tab::Pong]
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Home => " Home ",
            Tab::Snake => " Snake ",
            Tab::Tetris => " Tetris ",
            Tab::Pong => " Pong ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Snake => 1,
            Tab::Tetris => 2,
            Tab::Pong => 3,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub selected_game: usize, // 0-2 for home screen game selection
    pub snake: Snake,
    pub tetris: Tetris,
    pub pong: Pong,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            current_tab: Tab::Home,
            selected_game: 0,
            snake: Snake::new(),
            tetris: Tetris::new(),
            pong: Pong::new(),
        }
    }

    /// One animation frame. Only the visible game advances; the others keep
    /// whatever state they were left in.
    pub fn on_tick(&mut self) {
        match self.current_tab {
            Tab::Home => {}
            Tab::Snake => self.snake.update(),
            Tab::Tetris => self.tetris.update(),
            Tab::Pong => self.pong.update(),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Global keys
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                if matches!(self.current_tab, Tab::Home) {
                    self.should_quit = true;
                    return;
                }
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab();
                } else {
                    self.next_tab();
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab();
                return;
            }
            KeyCode::Esc => {
                if !matches!(self.current_tab, Tab::Home) {
                    self.current_tab = Tab::Home;
                    return;
                }
            }
            _ => {}
        }

        // Home screen shortcuts and tile navigation
        if matches!(self.current_tab, Tab::Home) && key.modifiers.is_empty() {
            match key.code {
                KeyCode::Char('1') => {
                    self.current_tab = Tab::Snake;
                    return;
                }
                KeyCode::Char('2') => {
                    self.current_tab = Tab::Tetris;
                    return;
                }
                KeyCode::Char('3') => {
                    self.current_tab = Tab::Pong;
                    return;
                }
                KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                    self.selected_game = (self.selected_game + 1) % 3;
                    return;
                }
                KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                    self.selected_game = (self.selected_game + 2) % 3;
                    return;
                }
                KeyCode::Enter => {
                    self.current_tab = match self.selected_game {
                        0 => Tab::Snake,
                        1 => Tab::Tetris,
                        2 => Tab::Pong,
                        _ => Tab::Home,
                    };
                    return;
                }
                _ => {}
            }
        }

        // Forward to active game
        match self.current_tab {
            Tab::Home => {}
            Tab::Snake => self.snake.handle_input(key),
            Tab::Tetris => self.tetris.handle_input(key),
            Tab::Pong => self.pong.handle_input(key),
        }
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.current_tab = tabs[(idx + 1) % tabs.len()];
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.current_tab = tabs[(idx + tabs.len() - 1) % tabs.len()];
    }
}

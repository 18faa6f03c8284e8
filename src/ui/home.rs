use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;

const BANNER: &str = r#"
██████╗ ███████╗████████╗██████╗  ██████╗  ██████╗ █████╗ ██████╗ ███████╗
██╔══██╗██╔════╝╚══██╔══╝██╔══██╗██╔═══██╗██╔════╝██╔══██╗██╔══██╗██╔════╝
██████╔╝█████╗     ██║   ██████╔╝██║   ██║██║     ███████║██║  ██║█████╗
██╔══██╗██╔══╝     ██║   ██╔══██╗██║   ██║██║     ██╔══██║██║  ██║██╔══╝
██║  ██║███████╗   ██║   ██║  ██║╚██████╔╝╚██████╗██║  ██║██████╔╝███████╗
╚═╝  ╚═╝╚══════╝   ╚═╝   ╚═╝  ╚═╝ ╚═════╝  ╚═════╝╚═╝  ╚═╝╚═════╝ ╚══════╝"#;

struct GameTile {
    key: &'static str,
    icon: &'static str,
    name: &'static str,
    desc: &'static str,
    color: Color,
    border_color: Color,
}

const GAME_TILES: [GameTile; 3] = [
    GameTile {
        key: "1",
        icon: "🐍",
        name: "Snake",
        desc: "Eat, grow, and\ndodge your tail!",
        color: Color::Rgb(80, 220, 80),
        border_color: Color::Rgb(40, 120, 40),
    },
    GameTile {
        key: "2",
        icon: "🧩",
        name: "Tetris",
        desc: "Stack the blocks,\nclear the lines!",
        color: Color::Rgb(100, 150, 255),
        border_color: Color::Rgb(50, 75, 140),
    },
    GameTile {
        key: "3",
        icon: "🏓",
        name: "Pong",
        desc: "Outplay the AI,\nfirst to ten!",
        color: Color::Rgb(240, 200, 90),
        border_color: Color::Rgb(140, 110, 40),
    },
];

fn render_game_tile(frame: &mut Frame, area: Rect, tile: &GameTile, selected: bool) {
    let border_color = if selected {
        Color::Rgb(255, 220, 80)
    } else {
        tile.border_color
    };
    let border_type = if selected {
        BorderType::Double
    } else {
        BorderType::Rounded
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let mut lines: Vec<Line> = Vec::new();

    let name_color = if selected {
        Color::Rgb(255, 255, 255)
    } else {
        tile.color
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!("[{}] ", tile.key),
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{} ", tile.icon), Style::default()),
        Span::styled(
            tile.name,
            Style::default().fg(name_color).add_modifier(Modifier::BOLD),
        ),
    ]));

    for desc_line in tile.desc.split('\n') {
        lines.push(Line::from(Span::styled(
            desc_line,
            Style::default().fg(if selected {
                Color::Rgb(180, 180, 200)
            } else {
                Color::Rgb(120, 120, 140)
            }),
        )));
    }

    if selected {
        lines.push(Line::from(Span::styled(
            "▶ Enter to play",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )));
    }

    let p = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(p, inner);
}

fn best_scores(app: &App) -> Vec<Line<'static>> {
    let rows = [
        ("🐍 Snake", app.snake.high_score()),
        ("🧩 Tetris", app.tetris.high_score()),
        ("🏓 Pong", app.pong.high_score()),
    ];
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  🏆 Best Scores",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (name, best) in rows {
        let shown = if best > 0 {
            best.to_string()
        } else {
            "—".to_string()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("    {name:<10}"), Style::default().fg(Color::Rgb(180, 180, 200))),
            Span::styled(shown, Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
        ]));
    }
    lines
}

fn game_controls(game_idx: usize) -> Vec<Line<'static>> {
    let key_style = Style::default().fg(Color::Rgb(80, 200, 255));
    let txt_style = Style::default().fg(Color::Rgb(140, 140, 140));
    match game_idx {
        0 => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  🐍 Snake",
                Style::default().fg(Color::Rgb(80, 220, 80)).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "  Grow without biting yourself!",
                Style::default().fg(Color::Rgb(100, 100, 120)),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("    ↑ ↓ ← → / WASD   ", key_style),
                Span::styled("Steer", txt_style),
            ]),
            Line::from(vec![
                Span::styled("    Space / P        ", key_style),
                Span::styled("Pause", txt_style),
            ]),
            Line::from(vec![
                Span::styled("    Enter            ", key_style),
                Span::styled("Start / restart", txt_style),
            ]),
            Line::from(vec![
                Span::styled("    R                ", key_style),
                Span::styled("Back to menu", txt_style),
            ]),
        ],
        1 => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  🧩 Tetris",
                Style::default().fg(Color::Rgb(100, 150, 255)).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "  Clear lines, climb levels!",
                Style::default().fg(Color::Rgb(100, 100, 120)),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("    ← / →            ", key_style),
                Span::styled("Move piece", txt_style),
            ]),
            Line::from(vec![
                Span::styled("    ↑ / W / Space    ", key_style),
                Span::styled("Rotate", txt_style),
            ]),
            Line::from(vec![
                Span::styled("    ↓ / S            ", key_style),
                Span::styled("Soft drop", txt_style),
            ]),
            Line::from(vec![
                Span::styled("    P                ", key_style),
                Span::styled("Pause", txt_style),
            ]),
            Line::from(vec![
                Span::styled("    Enter            ", key_style),
                Span::styled("Start / restart", txt_style),
            ]),
        ],
        2 => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  🏓 Pong",
                Style::default().fg(Color::Rgb(240, 200, 90)).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "  First to ten points wins!",
                Style::default().fg(Color::Rgb(100, 100, 120)),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("    ↑ / ↓ / W / S    ", key_style),
                Span::styled("Move paddle", txt_style),
            ]),
            Line::from(vec![
                Span::styled("    ← / → (menu)     ", key_style),
                Span::styled("Difficulty", txt_style),
            ]),
            Line::from(vec![
                Span::styled("    Space / P        ", key_style),
                Span::styled("Pause", txt_style),
            ]),
            Line::from(vec![
                Span::styled("    Enter            ", key_style),
                Span::styled("Start / rematch", txt_style),
            ]),
        ],
        _ => vec![],
    }
}

pub fn render_home(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),  // Banner
            Constraint::Length(2),  // Subtitle
            Constraint::Length(9),  // Game tiles
            Constraint::Min(8),     // Controls + best scores
            Constraint::Length(2),  // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 200, 255)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let subtitle = Paragraph::new(Line::from(Span::styled(
        "  ⚡ Three classics, one terminal ⚡  ",
        Style::default()
            .fg(Color::Rgb(255, 220, 80))
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let games_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🎮 Games — ←→ Select, Enter to Play ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        );
    let games_inner = games_block.inner(chunks[2]);
    frame.render_widget(games_block, chunks[2]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(games_inner);
    for (i, tile) in GAME_TILES.iter().enumerate() {
        render_game_tile(frame, cols[i], tile, app.selected_game == i);
    }

    let info_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(chunks[3]);

    let controls_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 60, 90)))
        .title(" Controls ")
        .title_style(Style::default().fg(Color::Rgb(120, 120, 150)));
    let controls_inner = controls_block.inner(info_cols[0]);
    frame.render_widget(controls_block, info_cols[0]);
    frame.render_widget(
        Paragraph::new(game_controls(app.selected_game)),
        controls_inner,
    );

    let scores_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 60, 90)))
        .title(" High Scores ")
        .title_style(Style::default().fg(Color::Rgb(120, 120, 150)));
    let scores_inner = scores_block.inner(info_cols[1]);
    frame.render_widget(scores_block, info_cols[1]);
    frame.render_widget(Paragraph::new(best_scores(app)), scores_inner);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("  Tab", Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(" switch game  ", Style::default().fg(Color::Rgb(100, 100, 120))),
        Span::styled("Esc", Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(" home  ", Style::default().fg(Color::Rgb(100, 100, 120))),
        Span::styled("Q", Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(" quit", Style::default().fg(Color::Rgb(100, 100, 120))),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[4]);
}

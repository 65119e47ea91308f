use std::io;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;

use crate::game::{Difficulty, GameController, Phase, CELL_COLS, CELL_ROWS};

/// Screen areas recorded during the last draw, for mouse hit-testing.
#[derive(Default)]
struct HitRegions {
    menu_buttons: [Rect; 3],
    board_inner: Rect,
    restart: Rect,
    quit: Rect,
}

pub fn run_tui(initial: Option<Difficulty>, seed: u64) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let _guard = TermGuard;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut game = GameController::with_seed(seed);
    if let Some(d) = initial {
        game.start(d).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    }
    let mut cursor = (0usize, 0usize);
    let poll_timeout = Duration::from_millis(250);

    let mut regions = HitRegions::default();
    let res = loop {
        terminal.draw(|f| regions = ui(f, &game, cursor))?;

        if event::poll(poll_timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let KeyCode::Char('q') | KeyCode::Esc = key.code {
                        break Ok(());
                    }
                    match game.phase() {
                        Phase::Menu => on_menu_key(&mut game, key.code),
                        Phase::Playing => on_play_key(&mut game, &mut cursor, key.code),
                        Phase::GameOver => {
                            if key.code == KeyCode::Char('r') {
                                game.restart().ok();
                                cursor = (0, 0);
                            }
                        }
                    }
                }
                Event::Mouse(m) => {
                    if let MouseEventKind::Down(MouseButton::Left) = m.kind {
                        match game.phase() {
                            Phase::Menu => {
                                for (i, r) in regions.menu_buttons.iter().enumerate() {
                                    if hit(*r, m.column, m.row) {
                                        game.start(Difficulty::ALL[i]).ok();
                                        cursor = (0, 0);
                                    }
                                }
                            }
                            Phase::Playing => {
                                let inner = regions.board_inner;
                                if hit(inner, m.column, m.row) {
                                    game.click(m.column - inner.x, m.row - inner.y);
                                }
                            }
                            Phase::GameOver => {
                                if hit(regions.restart, m.column, m.row) {
                                    game.restart().ok();
                                    cursor = (0, 0);
                                } else if hit(regions.quit, m.column, m.row) {
                                    break Ok(());
                                }
                            }
                        }
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    };

    terminal.show_cursor()?;
    res
}

fn on_menu_key(game: &mut GameController, code: KeyCode) {
    let choice = match code {
        KeyCode::Char('1') => Some(Difficulty::Low),
        KeyCode::Char('2') => Some(Difficulty::Medium),
        KeyCode::Char('3') => Some(Difficulty::High),
        _ => None,
    };
    if let Some(d) = choice {
        game.start(d).ok();
    }
}

fn on_play_key(game: &mut GameController, cursor: &mut (usize, usize), code: KeyCode) {
    let size = game.board().map(|b| b.size()).unwrap_or(0);
    match code {
        KeyCode::Char('h') | KeyCode::Left => {
            if cursor.0 > 0 { cursor.0 -= 1; }
        }
        KeyCode::Char('l') | KeyCode::Right => {
            if cursor.0 + 1 < size { cursor.0 += 1; }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if cursor.1 > 0 { cursor.1 -= 1; }
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if cursor.1 + 1 < size { cursor.1 += 1; }
        }
        KeyCode::Enter | KeyCode::Char(' ') => game.reveal(cursor.0, cursor.1),
        _ => {}
    }
}

fn ui(f: &mut ratatui::Frame, game: &GameController, cursor: (usize, usize)) -> HitRegions {
    match game.phase() {
        Phase::Menu => menu_screen(f),
        Phase::Playing => board_screen(f, game, cursor),
        Phase::GameOver => game_over_screen(f),
    }
}

fn menu_screen(f: &mut ratatui::Frame) -> HitRegions {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(f.size());

    let title = Paragraph::new("Choose Difficulty")
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Minefield"));
    f.render_widget(title, rows[0]);

    let mut regions = HitRegions::default();
    for (i, d) in Difficulty::ALL.iter().enumerate() {
        let area = centered_horizontal(rows[2 + i * 2], 30);
        let button = Paragraph::new(format!("{}. {}", i + 1, d.label()))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(button, area);
        regions.menu_buttons[i] = area;
    }
    regions
}

fn board_screen(f: &mut ratatui::Frame, game: &GameController, cursor: (usize, usize)) -> HitRegions {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.size());

    let header = Paragraph::new("Mouse: left click reveals • Arrows/HJKL move • Enter/Space reveal • q quit")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Minefield"));
    f.render_widget(header, root[0]);

    let board = game.board().expect("board exists while playing");
    let area = centered_grid_area(root[1], board.size() as u16);
    draw_board(f, game, area, cursor);

    let footer = Paragraph::new(format!(
        "{}  •  Bombs: {}",
        game.difficulty().label(),
        board.bomb_count()
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, root[2]);

    HitRegions { board_inner: inner_area(area), ..HitRegions::default() }
}

fn game_over_screen(f: &mut ratatui::Frame) -> HitRegions {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(f.size());

    let title = Paragraph::new("Game Over!")
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(title, rows[1]);

    let restart_area = centered_horizontal(rows[3], 20);
    let restart = Paragraph::new("(r) Restart")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(restart, restart_area);

    let quit_area = centered_horizontal(rows[5], 20);
    let quit = Paragraph::new("(q) Quit")
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(quit, quit_area);

    HitRegions { restart: restart_area, quit: quit_area, ..HitRegions::default() }
}

fn draw_board(f: &mut ratatui::Frame, game: &GameController, area: Rect, cursor: (usize, usize)) {
    let board = game.board().expect("board exists while playing");
    let mut lines: Vec<Line> = Vec::with_capacity(board.size());
    for y in 0..board.size() {
        let mut spans: Vec<Span> = Vec::with_capacity(board.size());
        for x in 0..board.size() {
            let c = board.cell(x, y).expect("in bounds");

            let mut ch = if c.revealed() {
                match c.value() {
                    0 => ' ',
                    n => char::from_digit(n as u32, 10).unwrap_or('?'),
                }
            } else {
                '·'
            };

            let mut style = if c.revealed() {
                number_style(c.value())
            } else {
                Style::default().fg(Color::DarkGray)
            };

            if cursor == (x, y) {
                style = style.add_modifier(Modifier::REVERSED);
                if ch == ' ' {
                    ch = '·';
                }
            }

            spans.push(Span::styled(format!("{} ", ch), style));
        }
        lines.push(Line::from(spans));
    }

    let para = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Board"));
    f.render_widget(para, area);
}

fn number_style(n: i8) -> Style {
    match n {
        0 => Style::default().fg(Color::Gray),
        1 => Style::default().fg(Color::Blue),
        2 => Style::default().fg(Color::Green),
        3 => Style::default().fg(Color::Red),
        4 => Style::default().fg(Color::Magenta),
        5 => Style::default().fg(Color::Yellow),
        6 => Style::default().fg(Color::Cyan),
        _ => Style::default().fg(Color::White),
    }
}

fn centered_grid_area(parent: Rect, size: u16) -> Rect {
    // +2 for the block borders around the cell grid.
    let grid_w = size * CELL_COLS + 2;
    let grid_h = size * CELL_ROWS + 2;
    let x = parent.x.saturating_add(parent.width.saturating_sub(grid_w) / 2);
    let y = parent.y.saturating_add(parent.height.saturating_sub(grid_h) / 2);
    Rect { x, y, width: grid_w.min(parent.width), height: grid_h.min(parent.height) }
}

fn centered_horizontal(parent: Rect, width: u16) -> Rect {
    let w = width.min(parent.width);
    let x = parent.x.saturating_add(parent.width.saturating_sub(w) / 2);
    Rect { x, width: w, ..parent }
}

fn inner_area(area: Rect) -> Rect {
    // Match Block::inner() for Borders::ALL: shrink by 1 on each side.
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

fn hit(r: Rect, col: u16, row: u16) -> bool {
    col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
}

struct TermGuard;
impl Drop for TermGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}

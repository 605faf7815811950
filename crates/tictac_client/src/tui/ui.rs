//! Stateless rendering of a [`BoardView`].

use crate::projection::{BoardView, CellView, StatusLine};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictac_protocol::Mark;

/// Draws title, board, status, notice and key help.
pub fn draw(frame: &mut Frame, view: &BoardView, cursor: usize, notice: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                     // Title
            Constraint::Min(view.side as u16 * 2 + 1), // Board
            Constraint::Length(3),                     // Status
            Constraint::Length(1),                     // Notice
            Constraint::Length(1),                     // Help
        ])
        .split(frame.area());

    let title = Paragraph::new(format!("Tic-Tac-Toe {}×{}", view.side, view.side))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let board = Paragraph::new(board_lines(view, cursor)).alignment(Alignment::Center);
    frame.render_widget(board, chunks[1]);

    let status_color = match view.status {
        StatusLine::AwaitingRemote => Color::Yellow,
        StatusLine::AwaitingPlayer => Color::White,
        StatusLine::PlayerWon => Color::Green,
        StatusLine::OpponentWon => Color::Red,
        StatusLine::Draw => Color::Blue,
    };
    let status = Paragraph::new(view.status.to_string())
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    if let Some(notice) = notice {
        let notice = Paragraph::new(notice)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(notice, chunks[3]);
    }

    let help = Paragraph::new("arrows/hjkl move · enter play · r restart · +/- size · q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn board_lines(view: &BoardView, cursor: usize) -> Vec<Line<'static>> {
    let separator = vec!["───"; view.side].join("┼");
    let mut lines = Vec::with_capacity(view.side * 2);
    for (row, cells) in view.rows().enumerate() {
        if row > 0 {
            lines.push(Line::from(Span::styled(
                separator.clone(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        let mut spans = Vec::with_capacity(view.side * 2);
        for (col, cell) in cells.iter().enumerate() {
            if col > 0 {
                spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
            }
            spans.push(cell_span(cell, cell.index == cursor));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn cell_span(cell: &CellView, under_cursor: bool) -> Span<'static> {
    let symbol = match cell.mark {
        Mark::Empty => " ",
        Mark::Player => "X",
        Mark::Opponent => "O",
    };

    let mut style = match cell.mark {
        Mark::Player => Style::default().fg(Color::Green),
        Mark::Opponent => Style::default().fg(Color::Red),
        Mark::Empty => Style::default(),
    };
    if cell.is_winning_cell {
        style = style.add_modifier(Modifier::BOLD).bg(Color::Yellow);
    }
    if cell.is_disabled && cell.mark == Mark::Empty {
        style = style.add_modifier(Modifier::DIM);
    }
    if under_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }

    Span::styled(format!(" {} ", symbol), style)
}

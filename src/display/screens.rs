//! Title and high-score screens.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use super::{draw_frame, Viewport};
use crate::highscore::HighScoreList;

const SCORE_ROWS: usize = 10;
const SCORE_COLUMN_WIDTH: u16 = 20;

fn centered<W: Write>(
    out: &mut W,
    vp: &Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (vp.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

pub fn draw_menu<W: Write>(
    out: &mut W,
    vp: Viewport,
    best: Option<u32>,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_frame(out, &vp)?;

    let cy = vp.rows / 2;
    centered(out, &vp, cy.saturating_sub(5), "o  FLOAT-I-POP  o", Color::Magenta)?;
    if let Some(best) = best {
        centered(out, &vp, cy.saturating_sub(4), &format!("Best Score: {best}"), Color::Yellow)?;
    }

    let lines: &[(&str, Color)] = &[
        ("Flap to stay aloft. Dodge the stars and whales,", Color::White),
        ("grab stray balloons. Lose them all and you drop.", Color::White),
        ("", Color::White),
        ("SPACE / ENTER : Start     ESC : Quit", Color::DarkGrey),
        ("← → : Steer   SPACE : Flap", Color::DarkGrey),
    ];
    for (i, (text, color)) in lines.iter().enumerate() {
        centered(out, &vp, cy.saturating_sub(2) + i as u16, text, *color)?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

/// Two columns of ten; the first entry matching the latest run is dimmed.
pub fn draw_high_scores<W: Write>(
    out: &mut W,
    vp: Viewport,
    list: &HighScoreList,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_frame(out, &vp)?;

    let top = (vp.rows / 2).saturating_sub(SCORE_ROWS as u16 / 2 + 2);
    centered(out, &vp, top, "HIGH SCORES", Color::Yellow)?;

    let left = (vp.cols / 2).saturating_sub(SCORE_COLUMN_WIDTH);
    let current = list.current_index();
    if list.is_empty() {
        centered(out, &vp, top + 2, "No scores yet", Color::DarkGrey)?;
    }
    for (i, score) in list.scores().iter().enumerate() {
        let col = left + (i / SCORE_ROWS) as u16 * SCORE_COLUMN_WIDTH;
        let row = top + 2 + (i % SCORE_ROWS) as u16;
        let color = if current == Some(i) {
            Color::DarkGrey
        } else {
            Color::White
        };
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(format!("{:>2}) {}", i + 1, score)))?;
    }

    centered(
        out,
        &vp,
        vp.rows.saturating_sub(2),
        "SPACE / ENTER / ESC : Back to menu",
        Color::DarkGrey,
    )?;
    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

use crate::application::ViewSnapshot;
use crate::domain::{Answers, Field, Recommendation, ViewState};
use crate::presentation::FormCursor;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn field_label(field: Field) -> &'static str {
    match field {
        Field::Like => "ความชอบ",
        Field::Skill => "ความถนัด",
        Field::Hobby => "งานอดิเรก",
        Field::Dream => "อาชีพในฝัน",
        Field::Hate => "สิ่งที่ไม่ชอบ",
    }
}

pub fn field_placeholder(field: Field) -> &'static str {
    match field {
        Field::Like => "เช่น วาดรูป, เขียนโค้ด",
        Field::Skill => "เช่น คณิต, อังกฤษ",
        Field::Hobby => "เช่น เล่นเกม, อ่านหนังสือ",
        Field::Dream => "เช่น CEO, Developer",
        Field::Hate => "เช่น เกลียดเลข",
    }
}

/// Draws the whole screen from a published snapshot.
///
/// `tick` only advances the spinner while analyzing.
pub fn render_ui(f: &mut Frame, snapshot: &ViewSnapshot, cursor: &FormCursor, tick: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    match &snapshot.state {
        ViewState::Input => render_form(f, &snapshot.answers, cursor, chunks[1]),
        ViewState::Analyzing => render_analyzing(f, tick, chunks[1]),
        ViewState::Result(recommendation) => render_result(f, recommendation, chunks[1]),
    }
    render_status_bar(f, &snapshot.state, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "AI Career Finder",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "ค้นหาคณะที่ใช่ จากตัวตนของคุณ",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, answers: &Answers, cursor: &FormCursor, area: Rect) {
    let mut constraints = vec![Constraint::Length(3); Field::ALL.len()];
    constraints.push(Constraint::Length(3));
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (index, field) in Field::ALL.into_iter().enumerate() {
        let focused = field == cursor.focused;
        let accent = if field.is_risk() { Color::Red } else { Color::Magenta };
        let border_style = if focused {
            Style::default().fg(accent)
        } else if field.is_risk() {
            Style::default().fg(Color::LightRed)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let value = answers.get(field);
        let content = if value.is_empty() {
            Span::styled(field_placeholder(field), Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(value)
        };

        let input = Paragraph::new(Line::from(content)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(field_label(field)),
        );
        f.render_widget(input, rows[index]);

        if focused {
            let before: String = value.chars().take(cursor.position).collect();
            let offset = Span::raw(before).width() as u16;
            let row = rows[index];
            let x = (row.x + 1 + offset).min(row.right().saturating_sub(2));
            f.set_cursor_position(Position::new(x, row.y + 1));
        }
    }

    let button = Paragraph::new(Line::from(vec![
        Span::styled(
            "วิเคราะห์ผลด้วย AI",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  →", Style::default().fg(Color::Magenta)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Magenta)));
    f.render_widget(button, rows[Field::ALL.len()]);
}

fn render_analyzing(f: &mut Frame, tick: usize, area: Rect) {
    let spinner = SPINNER[tick % SPINNER.len()];
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{spinner}  🧠  {spinner}"),
            Style::default().fg(Color::Magenta),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "กำลังประมวลผล...",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "AI กำลังตรวจสอบความเข้ากันได้",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "กับฐานข้อมูล 300+ หลักสูตร",
            Style::default().fg(Color::Gray),
        )),
    ];
    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn render_result(f: &mut Frame, recommendation: &Recommendation, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(area);

    let mut lines = vec![
        Line::from(Span::styled(
            recommendation.winner.as_str(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("score {}", recommendation.score),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled("วิชาที่แมตช์กัน", Style::default().fg(Color::DarkGray))),
    ];
    for course in &recommendation.courses {
        lines.push(Line::from(vec![
            Span::styled("• ", Style::default().fg(Color::Magenta)),
            Span::raw(course.name.as_str()),
            Span::styled(format!("  {}%", course.match_score), Style::default().fg(Color::DarkGray)),
        ]));
    }

    let winner = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title("แนะนำอันดับ 1"),
        );
    f.render_widget(winner, chunks[0]);

    let runner_up = Paragraph::new(Line::from(Span::styled(
        recommendation.runner_up.as_str(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL).title("รองชนะเลิศอันดับ 2"));
    f.render_widget(runner_up, chunks[1]);
}

fn render_status_bar(f: &mut Frame, state: &ViewState, area: Rect) {
    let text = match state {
        ViewState::Input => "Tab/↑↓: move | Enter: next field, submit on the last | Esc: quit",
        ViewState::Analyzing => "Analyzing... please wait",
        ViewState::Result(_) => "Enter/r: ลองใหม่อีกครั้ง | q: quit",
    };
    let style = match state {
        ViewState::Input => Style::default(),
        ViewState::Analyzing => Style::default().fg(Color::Cyan),
        ViewState::Result(_) => Style::default().fg(Color::Green),
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

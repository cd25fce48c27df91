use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    render_displays(frame, app, chunks[0]);
    render_plot(frame, app, chunks[1]);
    render_history(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);
    render_help(frame, chunks[4]);
}

/// The two display components, active one highlighted.
fn render_displays(frame: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let active = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    let inactive = Style::default().fg(Color::DarkGray);

    let re_block = Block::default()
        .borders(Borders::ALL)
        .title("Real")
        .border_style(if app.editing_im { inactive } else { active });
    let im_block = Block::default()
        .borders(Borders::ALL)
        .title("Imaginary")
        .border_style(if app.editing_im { active } else { inactive });

    frame.render_widget(
        Paragraph::new(app.entry_re.as_str())
            .alignment(ratatui::layout::Alignment::Right)
            .block(re_block),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(app.entry_im.as_str())
            .alignment(ratatui::layout::Alignment::Right)
            .block(im_block),
        halves[1],
    );
}

/// Scatter plot of the last calculation on the complex plane.
fn render_plot(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Argand plane");

    let Some(plot) = &app.plot else {
        frame.render_widget(
            Paragraph::new("No calculation yet").block(block),
            area,
        );
        return;
    };

    let operand1 = [(plot.operand1.re, plot.operand1.im)];
    let operand2 = plot.operand2.map(|c| [(c.re, c.im)]);
    let result = [(plot.result.re, plot.result.im)];

    let mut datasets = vec![Dataset::default()
        .name("Operand 1")
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::Cyan))
        .data(&operand1)];
    if let Some(points) = &operand2 {
        datasets.push(
            Dataset::default()
                .name("Operand 2")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Magenta))
                .data(points),
        );
    }
    datasets.push(
        Dataset::default()
            .name("Result")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Green))
            .data(&result),
    );

    let mut points = vec![plot.operand1, plot.result];
    if let Some(op2) = plot.operand2 {
        points.push(op2);
    }
    let (x_bounds, y_bounds) = plot_bounds(&points);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Re")
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title("Im")
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );

    frame.render_widget(chart, area);
}

/// Axis ranges padded by 10%, with a fallback margin so coincident
/// points still get a visible window.
fn plot_bounds(points: &[crate::complex::ComplexNumber]) -> ([f64; 2], [f64; 2]) {
    let min_re = points.iter().map(|c| c.re).fold(f64::INFINITY, f64::min);
    let max_re = points.iter().map(|c| c.re).fold(f64::NEG_INFINITY, f64::max);
    let min_im = points.iter().map(|c| c.im).fold(f64::INFINITY, f64::min);
    let max_im = points.iter().map(|c| c.im).fold(f64::NEG_INFINITY, f64::max);

    let re_margin = ((max_re - min_re) * 0.1).max(0.1);
    let im_margin = ((max_im - min_im) * 0.1).max(0.1);

    (
        [min_re - re_margin, max_re + re_margin],
        [min_im - im_margin, max_im + im_margin],
    )
}

fn axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    vec![
        Span::raw(format!("{:.2}", bounds[0])),
        Span::raw(format!("{:.2}", (bounds[0] + bounds[1]) / 2.0)),
        Span::raw(format!("{:.2}", bounds[1])),
    ]
}

/// The most recent history entries, cursor position highlighted.
fn render_history(frame: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let len = app.history.len();
    let start = len.saturating_sub(visible.max(1));

    let lines: Vec<Line> = app.history.entries()[start..]
        .iter()
        .enumerate()
        .map(|(offset, entry)| {
            let index = start + offset;
            let mut text = format!(
                "{:>3}  {}  {} ",
                index + 1,
                entry.operation.identity(),
                entry.operand1
            );
            if let Some(op2) = entry.operand2 {
                text.push_str(&format!(", {op2} "));
            }
            text.push_str(&format!("=> {}", entry.result));

            let style = if app.cursor.current() == Some(index) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(text, style))
        })
        .collect();

    let title = format!("History ({len})");
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(message) = &app.message {
        Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        let pending = app
            .pending
            .map(|op| op.identity())
            .unwrap_or("-");
        let last = app.last_operation.unwrap_or("-");
        Line::from(format!(
            "pending: {pending}   last: {last}   M: {}",
            app.memory.recall()
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = "0-9 . ~ digits | Tab re/im | + - * / = ops | a c x r v unary | \
                u/U undo/redo | X clear | m{c,r,s,+} memory | g{a,c,t,e} shapes | ^S/^O save/load | q quit";
    frame.render_widget(
        Paragraph::new(Span::styled(help, Style::default().fg(Color::DarkGray))),
        area,
    );
}

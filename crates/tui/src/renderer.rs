use std::io::stdout;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use minkowski_core::geometry::{AffineMatrix, Vector2};
use minkowski_core::model::{DiagramSession, FrameState, ParameterSubmission, TICK_PERIOD};
use minkowski_protocol::{Point, RenderCommand, ThemeToken};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout as Split},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Circle, Context, Line as CanvasLine},
    },
};

/// Length of one drawn piece of a dashed line, in diagram pixels.
const DASH: f64 = 8.0;

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::FixedAxis | ThemeToken::AxisLabel => Color::White,
        ThemeToken::FixedGrid => Color::DarkGray,
        ThemeToken::PrimedAxis | ThemeToken::PrimedLabel => Color::LightBlue,
        ThemeToken::PrimedGrid => Color::Blue,
        ThemeToken::ObserverRest => Color::Gray,
        ThemeToken::ObserverMoving => Color::Cyan,
        ThemeToken::TimeMarker => Color::Red,
        ThemeToken::TextPrimary => Color::White,
    }
}

/// Pending control values, edited from the keyboard and sent on Enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub rotation: bool,
    pub relativity: bool,
    pub inverse: bool,
    pub speed: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Submit,
    Quit,
}

impl Controls {
    pub fn from_state(state: &FrameState) -> Self {
        Self {
            rotation: state.rotation,
            relativity: state.relativity,
            inverse: state.inverse,
            speed: state.speed.to_string(),
        }
    }

    pub fn submission(&self) -> ParameterSubmission {
        ParameterSubmission::complete(self.rotation, self.relativity, self.inverse, &*self.speed)
    }

    pub fn handle_key(&mut self, code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
            KeyCode::Enter => return KeyAction::Submit,
            KeyCode::Char('r') => self.rotation = !self.rotation,
            KeyCode::Char('l') => self.relativity = !self.relativity,
            KeyCode::Char('i') => self.inverse = !self.inverse,
            KeyCode::Backspace => {
                self.speed.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || matches!(c, '.' | '-' | 'e') => {
                self.speed.push(c);
            }
            _ => {}
        }
        KeyAction::None
    }
}

/// Maps command coordinates (screen pixels, y down) onto the canvas
/// (y up), through the current pixel transform.
struct Pen {
    height: f64,
    stack: Vec<AffineMatrix>,
}

impl Pen {
    fn new(height: f64) -> Self {
        Self {
            height,
            stack: vec![AffineMatrix::IDENTITY],
        }
    }

    fn current(&self) -> AffineMatrix {
        self.stack.last().copied().unwrap_or(AffineMatrix::IDENTITY)
    }

    fn push(&mut self, coefficients: [f64; 6]) {
        let next = self.current().compose(&AffineMatrix::new(coefficients));
        self.stack.push(next);
    }

    fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    fn map(&self, p: Point) -> (f64, f64) {
        let v = self.current().apply_to_point(Vector2::new(p.x, p.y));
        (v.x, self.height - v.y)
    }

    /// Uniform scale of the current transform, for radii.
    fn scale(&self) -> f64 {
        let [a, b, c, d, ..] = self.current().coefficients();
        (a * d - b * c).abs().sqrt()
    }
}

fn draw_segment(ctx: &mut Context<'_>, from: (f64, f64), to: (f64, f64), color: Color) {
    ctx.draw(&CanvasLine::new(from.0, from.1, to.0, to.1, color));
}

fn draw_dashed(ctx: &mut Context<'_>, from: (f64, f64), to: (f64, f64), color: Color) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = dx.hypot(dy);
    if length <= DASH {
        draw_segment(ctx, from, to, color);
        return;
    }
    let pieces = (length / DASH).ceil() as usize;
    for i in (0..pieces).step_by(2) {
        let t0 = i as f64 / pieces as f64;
        let t1 = ((i + 1) as f64 / pieces as f64).min(1.0);
        draw_segment(
            ctx,
            (from.0 + dx * t0, from.1 + dy * t0),
            (from.0 + dx * t1, from.1 + dy * t1),
            color,
        );
    }
}

fn paint_commands(ctx: &mut Context<'_>, cmds: &[RenderCommand], height: f64) {
    let mut pen = Pen::new(height);

    for cmd in cmds {
        match cmd {
            RenderCommand::DrawLine {
                from,
                to,
                color,
                dashed,
                ..
            } => {
                let (from, to) = (pen.map(*from), pen.map(*to));
                if *dashed {
                    draw_dashed(ctx, from, to, theme_to_color(*color));
                } else {
                    draw_segment(ctx, from, to, theme_to_color(*color));
                }
            }
            RenderCommand::FillRect { rect, color } => {
                let corners = [
                    Point::new(rect.x, rect.y),
                    Point::new(rect.right(), rect.y),
                    Point::new(rect.right(), rect.bottom()),
                    Point::new(rect.x, rect.bottom()),
                ]
                .map(|p| pen.map(p));
                let color = theme_to_color(*color);
                for i in 0..corners.len() {
                    draw_segment(ctx, corners[i], corners[(i + 1) % corners.len()], color);
                }
            }
            RenderCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                let (x, y) = pen.map(*center);
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: radius * pen.scale(),
                    color: theme_to_color(*color),
                });
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                ..
            } => {
                let (x, y) = pen.map(*position);
                ctx.print(
                    x,
                    y,
                    Span::styled(text.to_string(), Style::default().fg(theme_to_color(*color))),
                );
            }
            RenderCommand::PushTransform { coefficients } => pen.push(*coefficients),
            RenderCommand::PopTransform => pen.pop(),
            RenderCommand::Clear { .. }
            | RenderCommand::BeginGroup { .. }
            | RenderCommand::EndGroup => {}
        }
    }
}

fn flag(name: &str, on: bool) -> Span<'static> {
    let style = if on {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    };
    Span::styled(format!(" {name} "), style)
}

fn draw_ui(
    frame: &mut Frame<'_>,
    session: &DiagramSession,
    controls: &Controls,
    status: &str,
    cmds: &[RenderCommand],
) {
    let [header, body] = Split::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(frame.area());

    let applied = session.frame_state();
    let lines = vec![
        Line::from(vec![
            Span::styled(
                " minkowski ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            flag("[r]otation", controls.rotation),
            flag("re[l]ativity", controls.relativity),
            flag("[i]nverse", controls.inverse),
            Span::raw(format!(" speed: {}▏", controls.speed)),
            Span::styled(" ⏎ apply | q quit ", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![Span::styled(
            format!(
                " t = {} | applied speed {} | {}",
                session.clock().index(),
                applied.speed,
                status
            ),
            Style::default().fg(Color::Gray),
        )]),
    ];
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(Color::DarkGray)),
        header,
    );

    let layout = *session.layout();
    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::NONE))
        .background_color(Color::Black)
        .marker(Marker::Braille)
        .x_bounds([0.0, layout.width])
        .y_bounds([0.0, layout.height])
        .paint(|ctx| paint_commands(ctx, cmds, layout.height));
    frame.render_widget(canvas, body);
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, mut session: DiagramSession) -> Result<()> {
    let mut controls = Controls::from_state(session.frame_state());
    let mut status = String::from("ready");

    session.start();
    let mut cmds = session.render();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| draw_ui(frame, &session, &controls, &status, &cmds))?;

        let timeout = TICK_PERIOD.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match controls.handle_key(key.code) {
                KeyAction::Quit => break,
                KeyAction::Submit => match session.submit(&controls.submission()) {
                    Ok(next) => {
                        cmds = next;
                        status = "applied".into();
                    }
                    Err(err) => status = format!("ignored: {err}"),
                },
                KeyAction::None => {}
            }
        }

        if last_tick.elapsed() >= TICK_PERIOD {
            if let Some(next) = session.tick() {
                cmds = next;
            }
            last_tick = Instant::now();
        }
    }
    Ok(())
}

/// Run the animated diagram until the user quits.
pub fn run(session: DiagramSession) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

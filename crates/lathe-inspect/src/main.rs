//! lathe-inspect — TUI for poking at lathe's mesh generators.
//!
//! Shows the resolution, buffer state, counts and sub-mesh ranges of a
//! cylinder and a torus, and lets you remesh them and "upload" (fill,
//! validate, acknowledge) from the keyboard.
//!
//! Run `cargo run -p lathe-inspect -- [mesh.json]`. With a config path the
//! matching shape and layout start from that file, and `w` writes back to it.

use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use lathe::logging::{self, CapturedLog};
use lathe::prelude::*;

const MAX_LOGS: usize = 500;
const RADIUS_STEP: f32 = 0.05;
const DEFAULT_CONFIG_PATH: &str = "lathe.json";

// ── Tabs ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Cylinder,
    Torus,
    Logs,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Cylinder, Tab::Torus, Tab::Logs];

    fn next(self) -> Self {
        match self {
            Tab::Cylinder => Tab::Torus,
            Tab::Torus => Tab::Logs,
            Tab::Logs => Tab::Cylinder,
        }
    }

    fn prev(self) -> Self {
        match self {
            Tab::Cylinder => Tab::Logs,
            Tab::Torus => Tab::Cylinder,
            Tab::Logs => Tab::Torus,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Tab::Cylinder => "Cylinder",
            Tab::Torus => "Torus",
            Tab::Logs => "Logs",
        }
    }

    /// Names of the editable parameters on this tab.
    fn params(self) -> &'static [&'static str] {
        match self {
            Tab::Cylinder => &["slices", "stacks", "rings"],
            Tab::Torus => &["rings", "sides", "minor radius"],
            Tab::Logs => &[],
        }
    }
}

// ── App state ────────────────────────────────────────────────────────────

/// What the last "upload" of a shape produced.
#[derive(Debug, Clone, Copy)]
struct Upload {
    layout: VertexLayout,
    bytes: usize,
    report: MeshReport,
}

struct App {
    active_tab: Tab,
    /// Selected parameter row on the shape tabs.
    cursor: usize,
    cylinder: Cylinder,
    torus: Torus,
    normals: bool,
    texcoords: bool,
    cylinder_upload: Option<Upload>,
    torus_upload: Option<Upload>,
    logs: VecDeque<CapturedLog>,
    log_scroll_offset: usize,
    log_auto_scroll: bool,
    config_path: PathBuf,
}

impl App {
    fn new() -> Self {
        Self {
            active_tab: Tab::Cylinder,
            cursor: 0,
            cylinder: Cylinder::default(),
            torus: Torus::default(),
            normals: true,
            texcoords: true,
            cylinder_upload: None,
            torus_upload: None,
            logs: VecDeque::new(),
            log_scroll_offset: 0,
            log_auto_scroll: true,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Start from a config file: its shape replaces the default one of the
    /// same kind and its layout sets the attribute toggles.
    fn from_config(path: PathBuf, config: &MeshConfig) -> Result<Self, ConfigError> {
        let layout = config.layout()?;
        let mut app = Self::new();
        app.normals = layout.has_normals();
        app.texcoords = layout.has_texcoords();
        match config.instantiate() {
            Shape::Cylinder(c) => {
                app.cylinder = c;
                app.active_tab = Tab::Cylinder;
            }
            Shape::Torus(t) => {
                app.torus = t;
                app.active_tab = Tab::Torus;
            }
        }
        app.config_path = path;
        Ok(app)
    }

    fn layout(&self) -> VertexLayout {
        VertexLayout::packed(self.normals, self.texcoords)
    }

    /// Buffer state as the panels show it. An upload made with a different
    /// layout no longer matches, so the shape counts as stale.
    fn shown_state(&self, tab: Tab) -> BufferState {
        let (state, upload) = match tab {
            Tab::Torus => (self.torus.state(), self.torus_upload),
            _ => (self.cylinder.state(), self.cylinder_upload),
        };
        match upload {
            Some(up) if up.layout != self.layout() => BufferState::Stale,
            _ => state,
        }
    }

    fn pull_logs(&mut self) {
        for entry in logging::drain_captured(MAX_LOGS) {
            if self.logs.len() == MAX_LOGS {
                self.logs.pop_front();
            }
            self.logs.push_back(entry);
        }
    }

    /// Step the selected parameter by `delta` steps. Requests below the
    /// valid range are passed through so the clamp is visible.
    fn step_param(&mut self, delta: i32) {
        let step = |v: u32| v.saturating_add_signed(delta);
        match self.active_tab {
            Tab::Cylinder => {
                let r = self.cylinder.resolution();
                let (slices, stacks, rings) = match self.cursor {
                    0 => (step(r.slices), r.stacks, r.rings),
                    1 => (r.slices, step(r.stacks), r.rings),
                    _ => (r.slices, r.stacks, step(r.rings)),
                };
                self.cylinder.remesh(slices, stacks, rings);
            }
            Tab::Torus => {
                let r = self.torus.resolution();
                let (rings, sides, radius) = match self.cursor {
                    0 => (step(r.rings), r.sides, r.minor_radius),
                    1 => (r.rings, step(r.sides), r.minor_radius),
                    _ => (r.rings, r.sides, r.minor_radius + RADIUS_STEP * delta as f32),
                };
                self.torus.remesh(rings, sides, radius);
            }
            Tab::Logs => {}
        }
    }

    /// Fill, validate and acknowledge the active shape.
    fn upload(&mut self) {
        let layout = self.layout();
        match self.active_tab {
            Tab::Cylinder => {
                self.cylinder_upload = Some(upload(&self.cylinder, layout));
                self.cylinder.acknowledge_upload();
            }
            Tab::Torus => {
                self.torus_upload = Some(upload(&self.torus, layout));
                self.torus.acknowledge_upload();
            }
            Tab::Logs => {}
        }
    }

    fn active_config(&self) -> Option<MeshConfig> {
        let shape = match self.active_tab {
            Tab::Cylinder => ShapeConfig::Cylinder(self.cylinder.resolution()),
            Tab::Torus => ShapeConfig::Torus(self.torus.resolution()),
            Tab::Logs => return None,
        };
        Some(MeshConfig::new(shape, self.layout()))
    }

    fn save_config(&self) {
        let Some(config) = self.active_config() else {
            return;
        };
        match config.save(&self.config_path) {
            Ok(()) => log::info!("saved {}", self.config_path.display()),
            Err(e) => log::error!("{e}"),
        }
    }
}

fn upload<G: MeshGeometry>(geometry: &G, layout: VertexLayout) -> Upload {
    let buffers = geometry.build(layout);
    let report = check_mesh(&buffers);
    let bytes = buffers.vertex_bytes().len() + buffers.index_bytes().len();
    if report.is_clean() {
        log::info!(
            "uploaded {} vertices, {} triangles ({bytes} bytes)",
            report.vertex_count,
            report.triangle_count
        );
    } else {
        log::warn!("uploaded mesh has problems: {report:?}");
    }
    Upload { layout, bytes, report }
}

fn main() -> io::Result<()> {
    logging::init_capture(logging::DEFAULT_CAPTURE_CAPACITY);

    let mut app = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            let config = MeshConfig::load(&path).map_err(io::Error::other)?;
            App::from_config(path, &config).map_err(io::Error::other)?
        }
        None => App::new(),
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.pull_logs();

        terminal.draw(|f| ui(f, &app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if handle_key(&mut app, key) {
                    break;
                }
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

// ── Key handling ─────────────────────────────────────────────────────────

/// Returns `true` if the app should quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let on_shape = app.active_tab != Tab::Logs;
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,

        KeyCode::Char('1') => app.active_tab = Tab::Cylinder,
        KeyCode::Char('2') => app.active_tab = Tab::Torus,
        KeyCode::Char('3') => app.active_tab = Tab::Logs,
        KeyCode::Tab => {
            app.active_tab = if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_tab.prev()
            } else {
                app.active_tab.next()
            };
        }
        KeyCode::BackTab => app.active_tab = app.active_tab.prev(),

        // Layout toggles apply to both shapes.
        KeyCode::Char('n') => app.normals = !app.normals,
        KeyCode::Char('t') => app.texcoords = !app.texcoords,

        // Shape tab keys.
        KeyCode::Up if on_shape => app.cursor = app.cursor.saturating_sub(1),
        KeyCode::Down if on_shape => {
            app.cursor = (app.cursor + 1).min(app.active_tab.params().len() - 1);
        }
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') if on_shape => app.step_param(1),
        KeyCode::Left | KeyCode::Char('-') if on_shape => app.step_param(-1),
        KeyCode::PageUp if on_shape => app.step_param(10),
        KeyCode::PageDown if on_shape => app.step_param(-10),
        KeyCode::Char('u') if on_shape => app.upload(),
        KeyCode::Char('w') if on_shape => app.save_config(),

        // Logs tab keys.
        KeyCode::Char('g') if app.active_tab == Tab::Logs => {
            app.log_auto_scroll = !app.log_auto_scroll;
        }
        KeyCode::Up if app.active_tab == Tab::Logs => {
            app.log_auto_scroll = false;
            app.log_scroll_offset = app.log_scroll_offset.saturating_sub(1);
        }
        KeyCode::Down if app.active_tab == Tab::Logs => {
            app.log_auto_scroll = false;
            app.log_scroll_offset = (app.log_scroll_offset + 1).min(app.logs.len());
        }
        _ => {}
    }
    false
}

// ── Drawing ──────────────────────────────────────────────────────────────

fn ui(f: &mut ratatui::Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(1), // tab bar
            Constraint::Min(8),    // tab content
            Constraint::Length(1), // help bar
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_tab_bar(f, app, chunks[1]);
    match app.active_tab {
        Tab::Cylinder | Tab::Torus => draw_shape_tab(f, app, chunks[2]),
        Tab::Logs => draw_logs_tab(f, app, chunks[2]),
    }
    draw_help_bar(f, app, chunks[3]);
}

fn label(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(Color::DarkGray))
}

fn value(text: impl ToString) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(Color::White))
}

fn state_span(state: BufferState) -> Span<'static> {
    let color = if state.is_fresh() { Color::Green } else { Color::Yellow };
    Span::styled(
        format!(" {} ", state.label().to_uppercase()),
        Style::default().bg(color).fg(Color::Black),
    )
}

fn on_off(flag: bool) -> Span<'static> {
    if flag {
        Span::styled("on", Style::default().fg(Color::Cyan))
    } else {
        Span::styled("off", Style::default().fg(Color::DarkGray))
    }
}

fn draw_header(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let layout = app.layout();
    let text = Line::from(vec![
        Span::raw(" "),
        label("cylinder "),
        state_span(app.shown_state(Tab::Cylinder)),
        Span::raw("  "),
        label("torus "),
        state_span(app.shown_state(Tab::Torus)),
        Span::raw("  |  "),
        label("normals: "),
        on_off(app.normals),
        Span::raw("  "),
        label("texcoords: "),
        on_off(app.texcoords),
        Span::raw("  |  "),
        label("stride: "),
        value(format!("{} floats", layout.stride())),
    ]);

    let block = Block::default()
        .title(" lathe-inspect ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_tab_bar(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in Tab::ALL.iter().enumerate() {
        let num = format!(" {} ", i + 1);
        let text = format!("{} ", tab.label());
        if *tab == app.active_tab {
            spans.push(Span::styled(
                num,
                Style::default().bg(Color::Cyan).fg(Color::Black).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                text,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(num, Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(text, Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::raw("  "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ── Shape tabs ───────────────────────────────────────────────────────────

fn draw_shape_tab(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(4)])
        .split(columns[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(10)])
        .split(columns[1]);

    draw_params(f, app, left[0]);
    draw_counts(f, app, left[1]);
    draw_submeshes(f, app, right[0]);
    draw_report(f, app, right[1]);
}

fn draw_params(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let (values, state): (Vec<String>, BufferState) = match app.active_tab {
        Tab::Torus => {
            let r = app.torus.resolution();
            (
                vec![r.rings.to_string(), r.sides.to_string(), format!("{:.2}", r.minor_radius)],
                app.shown_state(Tab::Torus),
            )
        }
        _ => {
            let r = app.cylinder.resolution();
            (
                vec![r.slices.to_string(), r.stacks.to_string(), r.rings.to_string()],
                app.shown_state(Tab::Cylinder),
            )
        }
    };

    let mut lines = Vec::new();
    for (i, (name, v)) in app.active_tab.params().iter().zip(values).enumerate() {
        let selected = i == app.cursor;
        let marker = if selected { "\u{25b6} " } else { "  " };
        let style = if selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {marker}{name:<14}"), style),
            Span::styled(v, style),
        ]));
    }

    let block = Block::default()
        .title(Line::from(vec![Span::raw(" Resolution "), state_span(state), Span::raw(" ")]))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn count_line(name: &str, plain: usize, textured: usize) -> Line<'static> {
    Line::from(vec![
        label(&format!("  {name:<18}")),
        value(format!("{plain:>8}")),
        value(format!("{textured:>10}")),
    ])
}

fn draw_counts(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::from(vec![
        label(&format!("  {:<18}", "")),
        label(&format!("{:>8}", "no tex")),
        label(&format!("{:>10}", "tex")),
    ])];

    match app.active_tab {
        Tab::Torus => {
            let t = &app.torus;
            lines.push(count_line("vertices", t.vertex_count(false), t.vertex_count(true)));
            lines.push(count_line("elements", t.element_count(), t.element_count()));
            lines.push(count_line("side strip", t.side_strip_len(), t.side_strip_len()));
        }
        _ => {
            let c = &app.cylinder;
            lines.push(count_line("vertices", c.vertex_count(false), c.vertex_count(true)));
            lines.push(count_line("  disk", c.disk_vertex_count(), c.disk_vertex_count()));
            lines.push(count_line(
                "  side",
                c.side_vertex_count(false),
                c.side_vertex_count(true),
            ));
            lines.push(count_line("elements", c.element_count(), c.element_count()));
            lines.push(count_line("  disk", c.disk_element_count(), c.disk_element_count()));
            lines.push(count_line("  side", c.side_element_count(), c.side_element_count()));
        }
    }

    let block = Block::default()
        .title(" Counts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_submeshes(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Sub-meshes ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let ranges = match app.active_tab {
        Tab::Torus => app.torus.submeshes(),
        _ => app.cylinder.submeshes(),
    };

    let visible = inner.height as usize;
    let mut lines: Vec<Line> = ranges
        .iter()
        .take(visible)
        .map(|(name, r)| {
            Line::from(vec![
                label(&format!("  {name:<10}")),
                value(format!("{:>8}..{:<8}", r.offset, r.end())),
                label(&format!("{:>7} tris  @{} B", r.triangle_count(), r.byte_offset())),
            ])
        })
        .collect();
    if ranges.len() > visible && visible > 0 {
        lines.truncate(visible - 1);
        lines.push(Line::from(label(&format!("  … {} more", ranges.len() - (visible - 1)))));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_report(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let upload = match app.active_tab {
        Tab::Torus => app.torus_upload,
        _ => app.cylinder_upload,
    };

    let block = Block::default()
        .title(" Last upload ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(up) = upload else {
        let text = Line::from(label("  Nothing uploaded yet. Press [u]."));
        f.render_widget(Paragraph::new(text).block(block), area);
        return;
    };

    let r = up.report;
    let problem = |n: usize| {
        let color = if n == 0 { Color::Green } else { Color::Red };
        Span::styled(format!("{n}"), Style::default().fg(color))
    };
    let lines = vec![
        Line::from(vec![
            label("  layout     "),
            value(format!(
                "stride {} normals {} texcoords {}",
                up.layout.stride(),
                if up.layout.has_normals() { "on" } else { "off" },
                if up.layout.has_texcoords() { "on" } else { "off" },
            )),
            if up.layout == app.layout() {
                Span::raw("")
            } else {
                Span::styled("  (toggled since, re-upload)", Style::default().fg(Color::Yellow))
            },
        ]),
        Line::from(vec![
            label("  size       "),
            value(format!("{} vertices, {} triangles, {} B", r.vertex_count, r.triangle_count, up.bytes)),
        ]),
        Line::from(vec![label("  out of range  "), problem(r.out_of_range)]),
        Line::from(vec![label("  degenerate    "), problem(r.degenerate)]),
        Line::from(vec![label("  unreferenced  "), problem(r.unreferenced)]),
        Line::from(vec![label("  bad normals   "), problem(r.non_unit_normals)]),
        Line::from(vec![label("  inward faces  "), problem(r.inward_faces)]),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Logs tab ─────────────────────────────────────────────────────────────

fn draw_logs_tab(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let scroll_label = if app.log_auto_scroll { "auto" } else { "manual" };
    let block = Block::default()
        .title(format!(" Logs  {}  scroll:{} ", app.logs.len(), scroll_label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.logs.is_empty() {
        let text = Span::styled("  No log messages", Style::default().fg(Color::DarkGray));
        f.render_widget(Paragraph::new(text), inner);
        return;
    }

    let visible = inner.height as usize;
    let total = app.logs.len();
    let offset = if app.log_auto_scroll {
        total.saturating_sub(visible)
    } else {
        app.log_scroll_offset.min(total.saturating_sub(visible))
    };

    let lines: Vec<Line> = app
        .logs
        .iter()
        .skip(offset)
        .take(visible)
        .map(|entry| {
            let level_color = match entry.level {
                log::Level::Trace => Color::DarkGray,
                log::Level::Debug => Color::Gray,
                log::Level::Info => Color::Cyan,
                log::Level::Warn => Color::Yellow,
                log::Level::Error => Color::Red,
            };
            Line::from(vec![
                Span::styled(
                    format!("  [{:>6.1}s] ", entry.timestamp_secs),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<5} ", entry.level),
                    Style::default().fg(level_color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(entry.message.clone(), Style::default().fg(Color::White)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_help_bar(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let key = |k: &str| Span::styled(k.to_string(), Style::default().fg(Color::Cyan));
    let mut spans = vec![key(" [1-3]"), Span::raw(" tab  "), key("[Tab]"), Span::raw(" next  ")];

    if app.active_tab == Tab::Logs {
        spans.push(key("[g]"));
        spans.push(Span::raw(" auto-scroll  "));
        spans.push(key("[\u{2191}\u{2193}]"));
        spans.push(Span::raw(" scroll  "));
    } else {
        spans.push(key("[\u{2191}\u{2193}]"));
        spans.push(Span::raw(" select  "));
        spans.push(key("[\u{2190}\u{2192}]"));
        spans.push(Span::raw(" step  "));
        spans.push(key("[u]"));
        spans.push(Span::raw(" upload  "));
        spans.push(key("[w]"));
        spans.push(Span::raw(" save  "));
    }
    spans.push(key("[n]"));
    spans.push(Span::raw(" normals  "));
    spans.push(key("[t]"));
    spans.push(Span::raw(" texcoords  "));
    spans.push(key("[q]"));
    spans.push(Span::raw(" quit"));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

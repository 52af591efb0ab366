//! Algoviz - Terminal User Interface
//!
//! Animated walkthrough of Valid Palindrome and Alien Dictionary.
//! App logic lives in `algoviz::tui::viz_app`.
//!
//! Usage: `viz-tui [config.yaml]`

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
fn main() -> std::io::Result<()> {
    use algoviz::config::VizConfig;
    use algoviz::tui::viz_app::VizApp;

    // Logs go to stderr, which shares the terminal with the alternate
    // screen, so only install a subscriber when explicitly asked.
    if std::env::var_os("RUST_LOG").is_some() {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let app = match std::env::args().nth(1) {
        Some(path) => match VizConfig::load(&path) {
            Ok(config) => VizApp::from_config(&config),
            Err(e) => {
                eprintln!("Error loading {path}: {e}");
                std::process::exit(1);
            }
        },
        None => VizApp::new(),
    };

    tracing::info!("Starting visualizer TUI");
    tui::run(app)
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use algoviz::renderers::{
        AlienView, NodeStatus, PalindromeView, PointerRole, ProblemView, RenderFrame,
    };
    use algoviz::tui::viz_app::VizApp;
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{
        backend::CrosstermBackend,
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Paragraph, Wrap},
        Frame, Terminal,
    };
    use std::io;
    use std::time::{Duration, Instant};

    /// Run the TUI application.
    pub fn run(mut app: VizApp) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = run_main_loop(&mut terminal, &mut app);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        tracing::info!(frames = app.frame_count, "Visualizer TUI closed");
        result
    }

    fn run_main_loop(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        app: &mut VizApp,
    ) -> io::Result<()> {
        let tick_rate = Duration::from_millis(33);
        let mut last = Instant::now();

        loop {
            let frame = app.frame();
            terminal.draw(|f| ui(f, app, &frame))?;

            let timeout = tick_rate.saturating_sub(last.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }

            if app.should_quit {
                return Ok(());
            }

            let now = Instant::now();
            app.update(now - last);
            last = now;
        }
    }

    fn ui(f: &mut Frame, app: &VizApp, frame: &RenderFrame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(4),
                Constraint::Length(3),
            ])
            .split(f.area());

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        render_title(f, chunks[0], frame);
        match &frame.view {
            ProblemView::Palindrome(view) => render_palindrome(f, main_chunks[0], view),
            ProblemView::AlienDictionary(view) => render_alien(f, main_chunks[0], view),
        }
        render_code(f, main_chunks[1], frame);
        render_message(f, chunks[2], frame);
        render_controls(f, chunks[3], app, frame);
    }

    fn difficulty_color(difficulty: &str) -> Color {
        match difficulty {
            "Easy" => Color::Green,
            "Medium" => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn render_title(f: &mut Frame, area: Rect, frame: &RenderFrame) {
        let difficulty = frame.difficulty.to_string();
        let title = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                format!(" {}. {} ", frame.problem, frame.title),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("[{difficulty}]"),
                Style::default().fg(difficulty_color(&difficulty)),
            ),
            Span::raw(" | "),
            Span::styled(
                if frame.playing { "[PLAYING]" } else { "[PAUSED]" },
                Style::default().fg(if frame.playing {
                    Color::Green
                } else {
                    Color::Yellow
                }),
            ),
            Span::raw(" | "),
            Span::raw(frame.step_label.clone()),
            Span::raw(" | "),
            Span::styled(format!("{}x", frame.speed), Style::default().fg(Color::White)),
        ])])
        .block(Block::default().borders(Borders::ALL).title("algoviz"));
        f.render_widget(title, area);
    }

    fn render_palindrome(f: &mut Frame, area: Rect, view: &PalindromeView) {
        let cells: Vec<Span> = view
            .cells
            .iter()
            .map(|cell| {
                let color = match cell.role {
                    PointerRole::Both => Color::Magenta,
                    PointerRole::Left => Color::Blue,
                    PointerRole::Right => Color::Green,
                    PointerRole::None => Color::Gray,
                };
                let mut style = Style::default().fg(color);
                if cell.role != PointerRole::None {
                    style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                }
                if cell.comparing {
                    style = style.add_modifier(Modifier::SLOW_BLINK);
                }
                Span::styled(format!(" {} ", cell.ch), style)
            })
            .collect();

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Original: ", Style::default().fg(Color::Yellow)),
                Span::raw(format!("\"{}\"", view.original)),
            ]),
            Line::from(vec![
                Span::styled("Cleaned:  ", Style::default().fg(Color::Yellow)),
                Span::raw(format!("\"{}\"", view.cleaned)),
            ]),
            Line::from(""),
            Line::from(cells),
            Line::from(""),
        ];

        let mut pointers = Vec::new();
        if let Some(left) = view.left {
            pointers.push(Span::styled(
                format!("L: {left}  "),
                Style::default().fg(Color::Blue),
            ));
        }
        if let Some(right) = view.right {
            pointers.push(Span::styled(
                format!("R: {right}"),
                Style::default().fg(Color::Green),
            ));
        }
        lines.push(Line::from(pointers));

        if let Some(cmp) = view.comparison {
            let (symbol, color) = if cmp.is_match {
                ("=", Color::Green)
            } else {
                ("≠", Color::Red)
            };
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("'{}' {symbol} '{}'", cmp.left, cmp.right),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }

        let widget = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Two Pointers"));
        f.render_widget(widget, area);
    }

    fn render_alien(f: &mut Frame, area: Rect, view: &AlienView) {
        let words = view
            .words
            .iter()
            .map(|w| format!("\"{w}\""))
            .collect::<Vec<_>>()
            .join(" ");

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Words: ", Style::default().fg(Color::Yellow)),
                Span::raw(words),
            ]),
            Line::from(""),
        ];

        for node in &view.nodes {
            let color = match node.status {
                NodeStatus::Processing => Color::Magenta,
                NodeStatus::Resolved => Color::Green,
                NodeStatus::Queued => Color::Blue,
                NodeStatus::Pending => Color::Gray,
            };
            let successors = if node.successors.is_empty() {
                String::new()
            } else {
                let list: Vec<String> = node.successors.iter().map(char::to_string).collect();
                format!(" → {}", list.join(", "))
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {} ", node.letter),
                    Style::default()
                        .fg(color)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                ),
                Span::raw(format!(" in-degree {}{successors}", node.in_degree)),
            ]));
        }

        let queue: String = view.queue.iter().collect();
        let result: String = view.result.iter().collect();
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Queue:  ", Style::default().fg(Color::Blue)),
            Span::raw(if queue.is_empty() { "empty".to_string() } else { queue }),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Result: ", Style::default().fg(Color::Green)),
            Span::raw(if result.is_empty() { "empty".to_string() } else { result }),
        ]));

        let widget = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Graph"));
        f.render_widget(widget, area);
    }

    fn render_code(f: &mut Frame, area: Rect, frame: &RenderFrame) {
        let lines: Vec<Line> = frame
            .code
            .iter()
            .map(|line| {
                let style = if line.highlighted {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Line::from(Span::styled(
                    format!("{:>2} {}", line.number + 1, line.text),
                    style,
                ))
            })
            .collect();

        // Keep the highlighted line in view on short terminals
        let visible = usize::from(area.height.saturating_sub(2));
        let highlighted = frame.highlighted_line().map_or(0, |l| l.number);
        let scroll = highlighted.saturating_sub(visible / 2);
        let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);

        let widget = Paragraph::new(lines)
            .scroll((scroll, 0))
            .block(Block::default().borders(Borders::ALL).title("Code"));
        f.render_widget(widget, area);
    }

    fn render_message(f: &mut Frame, area: Rect, frame: &RenderFrame) {
        let widget = Paragraph::new(frame.message.clone())
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Current Step"));
        f.render_widget(widget, area);
    }

    fn render_controls(f: &mut Frame, area: Rect, app: &VizApp, frame: &RenderFrame) {
        let line = match &app.editor {
            Some(editor) => Line::from(vec![
                Span::styled("Input: ", Style::default().fg(Color::Yellow)),
                Span::raw(format!("{}_", editor.buffer)),
                Span::styled(
                    "  [Enter] Apply  [Esc] Cancel",
                    Style::default().fg(Color::Gray),
                ),
            ]),
            None => {
                let dim = |enabled: bool| {
                    Style::default().fg(if enabled { Color::White } else { Color::DarkGray })
                };
                Line::from(vec![
                    Span::raw("[Space] Play/Pause  "),
                    Span::styled("[←] Back  ", dim(frame.can_step_back)),
                    Span::styled("[→] Forward  ", dim(frame.can_step_forward)),
                    Span::raw("[R] Reset  [+/-] Speed  [N/P] Problem  [1-5] Preset  [E] Edit  [Q] Quit"),
                ])
            }
        };
        let widget =
            Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Controls"));
        f.render_widget(widget, area);
    }
}

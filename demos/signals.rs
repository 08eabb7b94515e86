use gpui::prelude::*;
use gpui::*;
use gpui_line_chart::theme::palette_color;
use gpui_line_chart::{ChartOptions, ChartTheme, ChartView, Line, LineSet};
use rand::Rng;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn generate_lines() -> LineSet {
    let mut rng = rand::rng();
    let count = 400;

    let sine: Vec<f64> = (0..count)
        .map(|i| (i as f64 * 0.05).sin() * 50.0 + 100.0 + rng.random_range(-4.0..4.0))
        .collect();

    let mut walk = Vec::with_capacity(count);
    let mut value: f64 = 80.0;
    for _ in 0..count {
        value = (value + rng.random_range(-5.0..5.0)).max(0.0);
        walk.push(value);
    }

    let bursts: Vec<f64> = (0..count)
        .map(|i| if (i / 40) % 3 == 0 { rng.random_range(120.0..180.0) } else { 20.0 })
        .collect();

    LineSet::new(vec![
        Line::new("Sine", palette_color(0), sine),
        Line::new("Random walk", palette_color(1), walk),
        Line::new("Bursts", palette_color(3), bursts),
    ])
}

struct DemoApp {
    chart: Entity<ChartView>,
}

impl Render for DemoApp {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .size_full()
            .p_4()
            .bg(gpui::white())
            .child(self.chart.clone())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    Application::new().run(|cx: &mut App| {
        let view = match ChartView::new(generate_lines(), ChartOptions::default(), ChartTheme::default(), cx) {
            Ok(view) => view,
            Err(err) => {
                error!("failed to create the chart: {err:#}");
                cx.quit();
                return;
            }
        };

        cx.open_window(WindowOptions::default(), |_window, cx| {
            let chart = cx.new(|_| view);
            cx.new(|_| DemoApp { chart })
        })
        .expect("failed to open window");
    });
}

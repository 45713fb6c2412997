use tracing::{Event, Level, Subscriber};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, EnvFilter, Layer, Registry};

const DEFAULT_FILTER: &str = "warn,shared=info,luckywheel_backend=info,luckywheel_backend::services=info,luckywheel_backend::generator=info,luckywheel_backend::games=info";

#[derive(Default)]
struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0.push_str(&format!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0.push_str(value);
        }
    }
}

/// One line per event: `[timestamp] marker target - message`.
fn format_line(timestamp: &str, level: &Level, target: &str, message: &str) -> Option<String> {
    let line = match *level {
        Level::ERROR => format!("[{}] ❌ Error: {} - {}", timestamp, target, message),
        Level::WARN => format!("[{}] ⚠️ Warning: {} - {}", timestamp, target, message),
        Level::INFO => format!("[{}] ℹ️ {} - {}", timestamp, target, message),
        Level::DEBUG => format!("[{}] 🔄 {} - {}", timestamp, target, message),
        _ => return None,
    };
    Some(line)
}

struct CustomLayer;

impl<S: Subscriber> Layer<S> for CustomLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        if metadata.target().starts_with("hyper") || metadata.target().starts_with("reqwest") {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        if visitor.0.is_empty() {
            return;
        }

        let now = chrono::Local::now();
        let timestamp = now.format("%Y-%m-%d %H:%M:%S%.3f").to_string();
        if let Some(line) = format_line(&timestamp, metadata.level(), metadata.target(), &visitor.0) {
            println!("{}", line);
        }
    }
}

pub fn setup() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = Registry::default()
        .with(env_filter)
        .with(CustomLayer);

    // try_init also routes `log` records from the shared crate
    if subscriber.try_init().is_err() {
        eprintln!("A global tracing subscriber was already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_markers() {
        let line = format_line("t", &Level::WARN, "luckywheel_backend::services", "fallback").unwrap();
        assert_eq!(line, "[t] ⚠️ Warning: luckywheel_backend::services - fallback");
        assert!(format_line("t", &Level::TRACE, "x", "y").is_none());
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}

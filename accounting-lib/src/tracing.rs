use tracing_actix_web::{DefaultRootSpanBuilder, TracingLogger};

pub fn create_middleware() -> TracingLogger<DefaultRootSpanBuilder> {
    TracingLogger::default()
}

use {
    crate::config::Config,
    std::{io::IsTerminal, panic::PanicHookInfo, sync::Once},
    time::macros::format_description,
    tracing::level_filters::LevelFilter,
    tracing_subscriber::{
        EnvFilter,
        Layer,
        fmt::{time::UtcTime, writer::MakeWriterExt as _},
        prelude::*,
        util::SubscriberInitExt,
    },
};

/// Installs the global subscriber described by `config` and routes panics
/// through it. Must be called at most once per process.
pub fn initialize(config: &Config) {
    install(config);
}

/// Installs a subscriber filtered by `filter` on the first call and ignores
/// every later call, so each test can call it.
pub fn initialize_reentrant(filter: &str) {
    static INSTALLED: Once = Once::new();
    INSTALLED.call_once(|| install(&Config::new(filter)));
}

fn install(config: &Config) {
    let writer = std::io::stdout
        .with_min_level(config.stderr_threshold)
        .or_else(std::io::stderr);
    let timer = UtcTime::new(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ));
    let filter = EnvFilter::new(&config.filter);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_timer(timer);
    let layer = match config.json {
        true => layer.json().with_filter(filter).boxed(),
        false => layer
            .with_ansi(std::io::stdout().is_terminal())
            .with_filter(filter)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(LevelFilter::TRACE)
        .with(layer)
        .init();
    std::panic::set_hook(Box::new(log_panic));
}

fn log_panic(info: &PanicHookInfo) {
    let thread = std::thread::current();
    let backtrace = std::backtrace::Backtrace::force_capture();
    tracing::error!(
        thread = thread.name().unwrap_or("<unnamed>"),
        "{info}\nstack backtrace:\n{backtrace}"
    );
}

use anyhow::Result;
use time::format_description::{self, BorrowedFormatItem};
use time::UtcOffset;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type Timer = OffsetTime<Vec<BorrowedFormatItem<'static>>>;

fn timer(offset: UtcOffset, format: &'static str) -> Result<Timer> {
    Ok(OffsetTime::new(offset, format_description::parse(format)?))
}

/// `RUST_LOG` takes precedence over the `debug` switch
fn env_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if debug {
            "certgate=debug,poem=debug"
        } else {
            "certgate=info"
        })
    })
}

pub fn init_logging(debug: bool) -> Result<()> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);

    // Compact output for interactive terminals
    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if console::user_attended() {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_timer(timer(offset, "[hour]:[minute]:[second]")?)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_timer(timer(
                offset,
                "[day].[month].[year] [hour]:[minute]:[second]",
            )?)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter(debug))
        .try_init()?;
    Ok(())
}

use eyre::EyreHandler;
use itertools::Itertools;
use std::{error::Error, fmt, panic::Location};
use wrap3_common::errors::dedup_chain;

/// Set to get the full `color-eyre` report, with span traces and source locations.
pub const DEBUG_ENV: &str = "WRAP3_DEBUG";

/// Renders a failed `wrap3` run as the message that stopped it, followed by its causes.
#[derive(Default)]
pub struct Handler {
    verbose: Option<Box<dyn EyreHandler>>,
}

impl Handler {
    /// Delegates all rendering to `verbose` when it is set.
    pub fn with_verbose(verbose: Option<Box<dyn EyreHandler>>) -> Self {
        Self { verbose }
    }
}

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", dedup_chain(error).into_iter().format("; "))
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(verbose) = &self.verbose {
            return verbose.debug(error, f);
        }
        if f.alternate() {
            return fmt::Debug::fmt(error, f);
        }

        let chain = dedup_chain(error);
        let Some((message, causes)) = chain.split_first() else { return Ok(()) };
        f.write_str(message)?;
        if causes.is_empty() {
            return Ok(());
        }
        f.write_str("\n\nContext:")?;
        for cause in causes {
            write!(f, "\n- {cause}")?;
        }
        Ok(())
    }

    fn track_caller(&mut self, location: &'static Location<'static>) {
        if let Some(verbose) = &mut self.verbose {
            verbose.track_caller(location);
        }
    }
}

/// Routes panics and `eyre` reports through `color-eyre`, keeping the short [`Handler`] output
/// for reports unless [`DEBUG_ENV`] is set.
pub fn install() {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section("This is a bug. Please report it at https://github.com/wrap3/wrap3")
        .into_hooks();
    panic_hook.install();

    let eyre_hook = eyre_hook.into_eyre_hook();
    let verbose = std::env::var_os(DEBUG_ENV).is_some();
    let installed = eyre::set_hook(Box::new(move |error| {
        Box::new(Handler::with_verbose(verbose.then(|| eyre_hook(error))))
    }));
    if let Err(err) = installed {
        debug!("eyre hook already set: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::WrapErr;
    use std::io;

    fn report() -> eyre::Report {
        Err::<(), _>(io::Error::other("No such file or directory"))
            .wrap_err(r#"failed to copy "node_modules/@openzeppelin""#)
            .wrap_err("failed to stage the dependency package")
            .unwrap_err()
    }

    struct Rendered<'a>(&'a Handler, &'a (dyn Error + 'static));

    impl fmt::Debug for Rendered<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.debug(self.1, f)
        }
    }

    impl fmt::Display for Rendered<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.display(self.1, f)
        }
    }

    #[test]
    fn debug_lists_context() {
        let report = report();
        let handler = Handler::default();
        assert_eq!(
            format!("{:?}", Rendered(&handler, report.as_ref())),
            "failed to stage the dependency package\n\nContext:\n\
             - failed to copy \"node_modules/@openzeppelin\"\n\
             - No such file or directory"
        );
    }

    #[test]
    fn display_joins_chain() {
        let report = report();
        let handler = Handler::default();
        assert_eq!(
            Rendered(&handler, report.as_ref()).to_string(),
            "failed to stage the dependency package; failed to copy \
             \"node_modules/@openzeppelin\"; No such file or directory"
        );
    }

    #[test]
    fn single_error_has_no_context() {
        let error = io::Error::other("permission denied");
        let handler = Handler::default();
        assert_eq!(format!("{:?}", Rendered(&handler, &error)), "permission denied");
    }
}

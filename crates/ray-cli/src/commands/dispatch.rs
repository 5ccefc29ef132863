//! Turns a validated invocation into a deeplink and hands it off.

use std::io::Write;

use ray_core::{Command, DeeplinkQuery, ExtensionManifest, Result, deeplink};
use tracing::debug;
use url::Url;

use super::builder::{DispatchMode, Invocation};
use crate::platform::Platform;
use crate::utils::stdin::ContextSource;

/// Builds deeplinks and performs the requested dispatch.
pub struct Dispatcher<'a> {
    platform: &'a dyn Platform,
    context: &'a dyn ContextSource,
}

impl<'a> Dispatcher<'a> {
    /// Dispatch through `platform`, reading piped input from `context`.
    pub fn new(platform: &'a dyn Platform, context: &'a dyn ContextSource) -> Self {
        Self { platform, context }
    }

    /// Build the deeplink for `invocation` and print, copy or open it.
    ///
    /// Argument mapping is validated before piped input is read, and nothing
    /// is dispatched unless every step succeeded.
    pub fn run(
        &self,
        manifest: &ExtensionManifest,
        command: &Command,
        invocation: &Invocation,
        out: &mut dyn Write,
    ) -> Result<Url> {
        let mut query = DeeplinkQuery::build(command, &invocation.values)?;
        if let Some(bytes) = self.context.read_context()? {
            query = query.with_context(&bytes);
        }
        let url = deeplink::build(manifest, command, &query)?;
        debug!(mode = ?invocation.mode, "dispatching {url}");

        match invocation.mode {
            DispatchMode::Print => {
                out.write_all(url.as_str().as_bytes())?;
                out.flush()?;
            },
            DispatchMode::Copy => self.platform.copy(url.as_str())?,
            DispatchMode::Open => self.platform.open(url.as_str())?,
        }
        Ok(url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub(crate) mod tests {
    use super::*;
    use crate::utils::stdin::StaticContext;
    use ray_core::{ArgumentSpec, Error};
    use std::cell::RefCell;

    /// Records every platform call instead of performing it.
    #[derive(Default)]
    pub(crate) struct RecordingPlatform {
        pub(crate) opened: RefCell<Vec<String>>,
        pub(crate) copied: RefCell<Vec<String>>,
        pub(crate) fail: bool,
    }

    impl RecordingPlatform {
        pub(crate) fn calls(&self) -> usize {
            self.opened.borrow().len() + self.copied.borrow().len()
        }
    }

    impl Platform for RecordingPlatform {
        fn open(&self, url: &str) -> Result<()> {
            if self.fail {
                return Err(Error::dispatch("open", "exit status: 1"));
            }
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }

        fn copy(&self, text: &str) -> Result<()> {
            if self.fail {
                return Err(Error::dispatch("pbcopy", "exit status: 1"));
            }
            self.copied.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    fn manifest() -> ExtensionManifest {
        ExtensionManifest {
            name: "ext".into(),
            author: "me".into(),
            ..ExtensionManifest::default()
        }
    }

    fn command(mode: &str, arguments: &[(&str, bool)]) -> Command {
        Command {
            name: "cmd".into(),
            mode: mode.into(),
            arguments: arguments
                .iter()
                .map(|(name, required)| ArgumentSpec {
                    name: (*name).into(),
                    required: *required,
                    ..ArgumentSpec::default()
                })
                .collect(),
            ..Command::default()
        }
    }

    fn invocation(values: &[&str], mode: DispatchMode) -> Invocation {
        Invocation {
            values: values.iter().map(ToString::to_string).collect(),
            mode,
        }
    }

    #[test]
    fn print_writes_the_exact_url_and_touches_nothing_else() {
        let platform = RecordingPlatform::default();
        let context = StaticContext(None);
        let mut out = Vec::new();

        Dispatcher::new(&platform, &context)
            .run(&manifest(), &command("view", &[]), &invocation(&[], DispatchMode::Print), &mut out)
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "raycast://extensions/me/ext/cmd");
        assert_eq!(platform.calls(), 0);
    }

    #[test]
    fn open_is_the_default() {
        let platform = RecordingPlatform::default();
        let context = StaticContext(None);
        let mut out = Vec::new();

        Dispatcher::new(&platform, &context)
            .run(
                &manifest(),
                &command("no-view", &[("a", true)]),
                &invocation(&["x"], DispatchMode::Open),
                &mut out,
            )
            .unwrap();

        assert!(out.is_empty());
        assert_eq!(
            platform.opened.borrow().as_slice(),
            ["raycast://extensions/me/ext/cmd?arguments=%7B%22a%22%3A%22x%22%7D&launchType=background"]
        );
        assert!(platform.copied.borrow().is_empty());
    }

    #[test]
    fn copy_hands_the_url_to_the_clipboard() {
        let platform = RecordingPlatform::default();
        let context = StaticContext(None);

        Dispatcher::new(&platform, &context)
            .run(&manifest(), &command("view", &[]), &invocation(&[], DispatchMode::Copy), &mut Vec::new())
            .unwrap();

        assert_eq!(platform.copied.borrow().as_slice(), ["raycast://extensions/me/ext/cmd"]);
        assert!(platform.opened.borrow().is_empty());
    }

    #[test]
    fn piped_input_becomes_context() {
        let platform = RecordingPlatform::default();
        let context = StaticContext(Some(b"hello".to_vec()));
        let mut out = Vec::new();

        let url = Dispatcher::new(&platform, &context)
            .run(&manifest(), &command("view", &[]), &invocation(&[], DispatchMode::Print), &mut out)
            .unwrap();

        assert_eq!(url.query(), Some("context=hello"));
    }

    #[test]
    fn empty_piped_input_is_ignored() {
        let platform = RecordingPlatform::default();
        let context = StaticContext(Some(Vec::new()));

        let url = Dispatcher::new(&platform, &context)
            .run(&manifest(), &command("view", &[]), &invocation(&[], DispatchMode::Print), &mut Vec::new())
            .unwrap();

        assert_eq!(url.query(), None);
    }

    #[test]
    fn missing_required_argument_prevents_dispatch() {
        let platform = RecordingPlatform::default();
        let context = StaticContext(None);

        let err = Dispatcher::new(&platform, &context)
            .run(
                &manifest(),
                &command("view", &[("scope", false), ("query", true)]),
                &invocation(&["repo"], DispatchMode::Open),
                &mut Vec::new(),
            )
            .unwrap_err();

        assert_eq!(err.to_string(), "missing required argument: query");
        assert_eq!(platform.calls(), 0);
    }

    #[test]
    fn platform_failures_are_surfaced() {
        let platform = RecordingPlatform {
            fail: true,
            ..RecordingPlatform::default()
        };
        let context = StaticContext(None);

        let err = Dispatcher::new(&platform, &context)
            .run(&manifest(), &command("view", &[]), &invocation(&[], DispatchMode::Open), &mut Vec::new())
            .unwrap_err();

        assert!(matches!(err, Error::Dispatch { .. }));
        assert_eq!(err.to_string(), "open: exit status: 1");
    }
}

//! Operator advisory for registries without a webhook API
//!
//! Docker Hub webhooks have to be configured by hand. The provisioner hands
//! the operator a link to the repository's webhook page and offers to copy
//! the web app's callback URI and open the page. This runs detached from the
//! deployment: nothing waits for the answer and failures are only logged.

use std::io::IsTerminal;
use std::sync::Arc;

use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};
use log::debug;

use crate::error::{Error, Result};

/// Docker Hub web UI host
pub const DOCKER_HUB_WEB_HOST: &str = "cloud.docker.com";

/// Label of the single action offered to the operator
pub const COPY_AND_OPEN: &str = "Copy & Open";

/// Link to the webhook settings page of a Docker Hub repository
pub fn docker_hub_webhook_url(namespace: &str, repo: &str) -> String {
    format!("https://{DOCKER_HUB_WEB_HOST}/repository/docker/{namespace}/{repo}/webHooks")
}

/// Everything the operator needs to finish setup by hand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubAdvisory {
    pub message: String,
    /// Webhook settings page
    pub link: String,
    /// Copied to the clipboard on accept
    pub callback_uri: String,
}

impl HubAdvisory {
    pub fn docker_hub(namespace: &str, repo: &str, callback_uri: &str) -> Self {
        let link = docker_hub_webhook_url(namespace, repo);
        Self {
            message: format!(
                "To set up a CI/CD webhook, open the page \"{}\" and enter the URI to the web app in your Docker Hub account.",
                link
            ),
            link,
            callback_uri: callback_uri.to_string(),
        }
    }
}

/// Operator-facing side effects of the advisory
pub trait OperatorPrompt: Send + Sync {
    /// Show `message` with one action; true if the operator accepted
    fn confirm(&self, message: &str, action: &str) -> Result<bool>;

    fn copy_to_clipboard(&self, text: &str) -> Result<()>;

    fn open_url(&self, url: &str) -> Result<()>;

    /// Called instead of copy and open when `confirm` returned false
    fn declined(&self, advisory: &HubAdvisory) -> Result<()>;
}

/// Ask, then copy and open on accept
pub fn run_advisory(prompt: &dyn OperatorPrompt, advisory: &HubAdvisory) -> Result<()> {
    if !prompt.confirm(&advisory.message, COPY_AND_OPEN)? {
        debug!("Advisory declined");
        return prompt.declined(advisory);
    }

    prompt.copy_to_clipboard(&advisory.callback_uri)?;
    prompt.open_url(&advisory.link)?;
    Ok(())
}

/// Best-effort side effect: show the advisory on a detached blocking task.
///
/// Returns immediately. The task's handle is dropped, so its outcome never
/// reaches the caller; errors are logged at debug level.
pub fn dispatch_best_effort(prompt: Arc<dyn OperatorPrompt>, advisory: HubAdvisory) {
    let _detached = tokio::task::spawn_blocking(move || {
        if let Err(e) = run_advisory(prompt.as_ref(), &advisory) {
            debug!("Advisory for {} failed: {}", advisory.link, e);
        }
    });
}

/// What to tell an operator who did not take the copy action.
///
/// The callback URI embeds deployment credentials, so it is only spelled out
/// when `reveal_callback` is set.
pub fn manual_steps_notice(advisory: &HubAdvisory, reveal_callback: bool) -> String {
    if reveal_callback {
        format!("Web app callback URI: {}", advisory.callback_uri)
    } else {
        "Run `acrhook webhook create` in a terminal to copy the web app's callback URI, \
         or pass --show-callback-uri to print it."
            .to_string()
    }
}

/// Terminal implementation backed by dialoguer, the system clipboard and browser
pub struct TerminalPrompt {
    interactive: bool,
    reveal_callback: bool,
}

impl TerminalPrompt {
    /// `interactive = false` prints the advisory and declines without asking
    pub fn new(interactive: bool) -> Self {
        Self {
            interactive,
            reveal_callback: false,
        }
    }

    /// Print the callback URI when the operator doesn't copy it
    pub fn reveal_callback(mut self, reveal: bool) -> Self {
        self.reveal_callback = reveal;
        self
    }

    fn can_ask(&self) -> bool {
        self.interactive && std::io::stdin().is_terminal()
    }
}

impl OperatorPrompt for TerminalPrompt {
    fn confirm(&self, message: &str, action: &str) -> Result<bool> {
        if !self.can_ask() {
            eprintln!("{} {}", "ℹ".cyan(), message);
            return Ok(false);
        }

        let accepted = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{}\n{}?", message, action))
            .default(false)
            .interact()?;
        Ok(accepted)
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| Error::Other(format!("clipboard: {}", e)))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| Error::Other(format!("clipboard: {}", e)))
    }

    fn open_url(&self, url: &str) -> Result<()> {
        open::that(url)?;
        Ok(())
    }

    fn declined(&self, advisory: &HubAdvisory) -> Result<()> {
        // An operator who said no at the prompt already saw the link
        if self.reveal_callback || !self.can_ask() {
            eprintln!(
                "{} {}",
                "ℹ".cyan(),
                manual_steps_notice(advisory, self.reveal_callback)
            );
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::testing::{PromptEvent, RecordingPrompt, drain_until_finished};
    use super::*;

    fn advisory() -> HubAdvisory {
        HubAdvisory::docker_hub(
            "acme",
            "widgets",
            "https://$app:pw@app.scm.azurewebsites.net/docker/hook",
        )
    }

    #[test]
    fn test_docker_hub_webhook_url() {
        assert_eq!(
            docker_hub_webhook_url("acme", "widgets"),
            "https://cloud.docker.com/repository/docker/acme/widgets/webHooks"
        );
    }

    #[test]
    fn test_advisory_message_mentions_link() {
        let advisory = advisory();
        assert!(advisory.message.contains(&advisory.link));
        assert!(!advisory.message.contains("pw@"));
    }

    #[test]
    fn test_accept_copies_then_opens() {
        let (prompt, events) = RecordingPrompt::new(true);
        run_advisory(&prompt, &advisory()).unwrap();
        drop(prompt);

        let events: Vec<PromptEvent> = events.try_iter().collect();
        assert!(matches!(&events[0], PromptEvent::Asked { action, .. } if action == COPY_AND_OPEN));
        assert_eq!(
            events[1],
            PromptEvent::Copied("https://$app:pw@app.scm.azurewebsites.net/docker/hook".to_string())
        );
        assert_eq!(
            events[2],
            PromptEvent::Opened(
                "https://cloud.docker.com/repository/docker/acme/widgets/webHooks".to_string()
            )
        );
        assert_eq!(events[3], PromptEvent::Finished);
    }

    #[test]
    fn test_decline_skips_copy_and_open() {
        let (prompt, events) = RecordingPrompt::new(false);
        run_advisory(&prompt, &advisory()).unwrap();
        drop(prompt);

        let events: Vec<PromptEvent> = events.try_iter().collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], PromptEvent::Asked { .. }));
        assert_eq!(events[1], PromptEvent::Declined);
        assert_eq!(events[2], PromptEvent::Finished);
    }

    #[test]
    fn test_manual_steps_notice_hides_credentials_by_default() {
        let notice = manual_steps_notice(&advisory(), false);
        assert!(!notice.contains("pw@"));
        assert!(notice.contains("--show-callback-uri"));
    }

    #[test]
    fn test_manual_steps_notice_reveals_callback_on_request() {
        let notice = manual_steps_notice(&advisory(), true);
        assert!(notice.contains("https://$app:pw@app.scm.azurewebsites.net/docker/hook"));
    }

    #[test]
    fn test_non_interactive_terminal_prompt_declines() {
        let prompt = TerminalPrompt::new(false).reveal_callback(true);
        assert!(!prompt.confirm("message", COPY_AND_OPEN).unwrap());
        assert!(prompt.declined(&advisory()).is_ok());
    }

    #[test]
    fn test_clipboard_failure_skips_open() {
        let (prompt, events) = RecordingPrompt::new(true);
        let prompt = prompt.failing_clipboard();
        assert!(run_advisory(&prompt, &advisory()).is_err());
        drop(prompt);

        let events: Vec<PromptEvent> = events.try_iter().collect();
        assert!(!events.iter().any(|e| matches!(e, PromptEvent::Opened(_))));
    }

    #[tokio::test]
    async fn test_dispatch_returns_before_operator_answers() {
        let (prompt, events) = RecordingPrompt::new(true);
        let (prompt, release) = prompt.gated();

        dispatch_best_effort(Arc::new(prompt), advisory());

        // Still parked on the gate
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(events.try_recv().is_err());

        release.send(()).unwrap();
        let asked = tokio::task::spawn_blocking(move || {
            events.recv_timeout(Duration::from_secs(5))
        })
        .await
        .unwrap()
        .unwrap();
        assert!(matches!(asked, PromptEvent::Asked { .. }));
    }

    #[tokio::test]
    async fn test_dispatch_swallows_failures() {
        let (prompt, events) = RecordingPrompt::new(true);
        dispatch_best_effort(Arc::new(prompt.failing_clipboard()), advisory());

        let seen = tokio::task::spawn_blocking(move || drain_until_finished(&events))
            .await
            .unwrap();
        assert!(matches!(seen.as_slice(), [PromptEvent::Asked { .. }]));
    }
}

//! Registry webhook provisioning
//!
//! Given a deployed web app and the repository/tag it runs, either create a
//! push webhook on an Azure Container Registry or, for Docker Hub, point the
//! operator at the hub's webhook page.

pub mod advisory;
pub mod naming;
pub mod provisioner;
pub mod target;

pub use advisory::TerminalPrompt;
pub use naming::generate_webhook_name;
pub use provisioner::{ProvisionOutcome, WebhookProvisioner, should_run};
pub use target::{
    AzureRegistry, DeployContext, DockerHubRepo, RegistryProvider, RepositoryReference,
};

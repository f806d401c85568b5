pub mod http_client;
pub mod package_installer;
pub mod repository_client;
pub mod wp_cli;

#[cfg(test)]
pub mod mock_installer;

pub use http_client::HttpRepositoryClient;
pub use package_installer::{
    InstallReport, InstallResult, PackageInstaller, GENERIC_INSTALL_FAILURE,
};
pub use repository_client::{
    download_url, parse_response, search_url, RepositoryClient, NOT_CONFIGURED,
};
pub use wp_cli::WpCliInstaller;

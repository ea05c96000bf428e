//! First-run seeding of the per-user data directory.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use comanda_core::{
    document::Document,
    error::{DocumentStoreError, DocumentStoreResult},
    schema::Schema,
};

/// File name of the shared datastore inside the data directory.
pub const DEFAULT_DB_FILE: &str = "comanda_shared_data.json";

/// The default document shipped with the binary.
pub const BUNDLED_TEMPLATE: &[u8] = include_bytes!("../templates/database-template.json");

/// Where the initial contents of a fresh data file come from.
#[derive(Debug, Clone, Default)]
pub enum Template {
    /// The template compiled into this crate.
    #[default]
    Bundled,
    /// A template file on disk, copied verbatim.
    File(PathBuf),
    /// Literal template bytes, written verbatim.
    Bytes(Vec<u8>),
}

impl Template {
    /// The resources a datastore seeded from this template can address.
    ///
    /// The bundled template has the point-of-sale layout. Custom templates are
    /// parsed and their top-level arrays and objects become the schema.
    pub async fn schema(&self) -> DocumentStoreResult<Schema> {
        let bytes = match self {
            Template::Bundled => return Ok(Schema::point_of_sale()),
            Template::Bytes(bytes) => bytes.clone(),
            Template::File(source) => tokio::fs::read(source)
                .await
                .map_err(|err| init_error(source, err))?,
        };

        let document = Document::from_slice(&bytes).map_err(|err| {
            DocumentStoreError::Initialization(format!("unusable template: {err}"))
        })?;
        let schema = Schema::infer(&document);
        if schema.is_empty() {
            return Err(DocumentStoreError::Initialization(
                "template declares no resources".to_string(),
            ));
        }

        let names: Vec<&str> = schema.resources().map(|spec| spec.name()).collect();
        debug!(resources = ?names, "schema inferred from template");
        Ok(schema)
    }
}

/// The platform-specific per-user application data directory.
pub fn default_data_dir() -> DocumentStoreResult<PathBuf> {
    ProjectDirs::from("com", "comanda", "comanda")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            DocumentStoreError::Initialization("could not determine home directory".to_string())
        })
}

/// Makes sure `data_dir/file_name` exists, seeding it from `template` if it does not.
///
/// Creates `data_dir` (recursively) when needed. An existing data file is never
/// touched, so running this twice is a no-op the second time.
///
/// Returns the resolved data file path.
pub async fn initialize(
    data_dir: &Path,
    file_name: &str,
    template: &Template,
) -> DocumentStoreResult<PathBuf> {
    let path = data_dir.join(file_name);

    if tokio::fs::try_exists(&path).await.map_err(|err| init_error(&path, err))? {
        info!(path = %path.display(), "shared database found");
        return Ok(path);
    }

    info!(path = %path.display(), "shared database not found, seeding from template");

    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|err| init_error(data_dir, err))?;

    let seeded = match template {
        Template::Bundled => tokio::fs::write(&path, BUNDLED_TEMPLATE).await,
        Template::Bytes(bytes) => tokio::fs::write(&path, bytes).await,
        Template::File(source) => {
            debug!(template = %source.display(), "copying template");
            tokio::fs::copy(source, &path).await.map(|_| ())
        }
    };
    seeded.map_err(|err| init_error(&path, err))?;

    info!(path = %path.display(), "shared database initialized");
    Ok(path)
}

fn init_error(path: &Path, err: std::io::Error) -> DocumentStoreError {
    DocumentStoreError::Initialization(format!("{}: {err}", path.display()))
}

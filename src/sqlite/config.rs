use serde::Deserialize;

use crate::error::PointStoreError;

/// Shared library and initializer for the spatial extension loaded after
/// connect.
///
/// The library name is platform specific. `SQLite` appends the platform
/// suffix when it is omitted, so the default `mod_spatialite` resolves on
/// Linux, macOS and Windows provided the module is on the loader path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpatialExtension {
    pub library: String,
    pub init_statement: String,
}

impl Default for SpatialExtension {
    fn default() -> Self {
        Self {
            library: "mod_spatialite".to_string(),
            init_statement: "SELECT InitSpatialMetadata()".to_string(),
        }
    }
}

impl SpatialExtension {
    #[must_use]
    pub fn new(library: impl Into<String>) -> Self {
        Self {
            library: library.into(),
            ..Self::default()
        }
    }

    pub(crate) fn load_statement(&self) -> String {
        format!("SELECT load_extension('{}')", self.library.replace('\'', "''"))
    }
}

/// Options for opening a `SQLite` session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SqliteOptions {
    /// Engine locator: a file path, `:memory:`, or a `file:` URI
    pub connection: String,
    /// Open read/write and create the file if missing
    pub write: bool,
    /// Extension bootstrapped after every successful connect; `None` skips it
    pub spatial_extension: Option<SpatialExtension>,
}

impl Default for SqliteOptions {
    fn default() -> Self {
        Self {
            connection: String::new(),
            write: false,
            spatial_extension: Some(SpatialExtension::default()),
        }
    }
}

impl SqliteOptions {
    #[must_use]
    pub fn new(connection: impl Into<String>) -> Self {
        Self {
            connection: connection.into(),
            ..Self::default()
        }
    }

    /// Parse options from a pipeline stage's JSON option blob.
    ///
    /// Missing keys take their defaults.
    ///
    /// # Errors
    /// Returns `PointStoreError::ConfigError` if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, PointStoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(connection: impl Into<String>) -> Self {
        Self {
            opts: SqliteOptions::new(connection),
        }
    }

    #[must_use]
    pub fn write(mut self, write: bool) -> Self {
        self.opts.write = write;
        self
    }

    #[must_use]
    pub fn spatial_extension(mut self, extension: SpatialExtension) -> Self {
        self.opts.spatial_extension = Some(extension);
        self
    }

    #[must_use]
    pub fn without_spatial_extension(mut self) -> Self {
        self.opts.spatial_extension = None;
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }
}

impl SqliteOptions {
    #[must_use]
    pub fn builder(connection: impl Into<String>) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(connection)
    }
}

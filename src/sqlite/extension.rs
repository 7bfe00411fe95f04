use tracing::Level;

use crate::error::PointStoreError;
use crate::sqlite::Connection;
use crate::sqlite::config::SpatialExtension;

/// Enable extension loading, load the spatial library and initialize its
/// metadata tables. Runs once per successful connect; never retried.
#[allow(unsafe_code)]
pub(crate) fn bootstrap(
    conn: &mut Connection,
    extension: &SpatialExtension,
) -> Result<(), PointStoreError> {
    let session = conn.session()?;
    // SAFETY: loading is only used for the configured extension library below;
    // the session is owned by this connection and never handed out.
    unsafe { session.load_extension_enable() }.map_err(|e| {
        PointStoreError::DriverError(format!("unable to enable extension loading: {e}"))
    })?;

    conn.execute(&extension.load_statement(), "unable to load spatial extension")?;
    conn.execute(
        &extension.init_statement,
        "unable to initialize spatial metadata",
    )?;
    conn.log().log(
        Level::DEBUG,
        &format!("spatial extension initialized: {}", extension.library),
    );
    Ok(())
}

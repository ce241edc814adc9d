//! The GStreamer basic tutorials as library functions.
//!
//! Each module builds its pipeline and runs its own bus loop; the binaries
//! only parse arguments, load the configuration and call `run`.

pub mod dynamic_pads;
pub mod element_chain;
pub mod seek_query;

use gstreamer as gst;
use gstreamer::prelude::GstObjectExt;
use tracing::error;

/// Log an ERROR message the way all tutorials report it and turn it into an error.
pub(crate) fn report_error(err: &gst::message::Error) -> anyhow::Error {
    let source = err
        .src()
        .map(|s| s.path_string().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    error!("Error received from element {}: {}", source, err.error());
    error!(
        "Debugging information: {}",
        err.debug().map(|d| d.to_string()).unwrap_or_else(|| "none".to_string())
    );
    anyhow::anyhow!("{}: {}", source, err.error())
}

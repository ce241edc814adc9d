//! [`AppRequest`] encoding as bus application messages.

use gstreamer as gst;
use gstreamer::prelude::*;
use hotswap_types::{AppRequest, SwapTarget};
use tracing::warn;

/// Structure name of a swap request. An `index` (i32) field selects a slot.
pub const SWAP_MESSAGE: &str = "hotswap-swap";
/// Structure name of a quit request.
pub const QUIT_MESSAGE: &str = "hotswap-quit";

pub fn to_structure(request: &AppRequest) -> gst::Structure {
    match request {
        AppRequest::Swap(SwapTarget::Next) => gst::Structure::new_empty(SWAP_MESSAGE),
        AppRequest::Swap(SwapTarget::Index(index)) => gst::Structure::builder(SWAP_MESSAGE)
            .field("index", i32::try_from(*index).unwrap_or(i32::MAX))
            .build(),
        AppRequest::Quit => gst::Structure::new_empty(QUIT_MESSAGE),
    }
}

/// Decode a structure; anything that is not one of ours yields `None`.
pub fn from_structure(structure: &gst::StructureRef) -> Option<AppRequest> {
    match structure.name().as_str() {
        QUIT_MESSAGE => Some(AppRequest::Quit),
        SWAP_MESSAGE => {
            if !structure.has_field("index") {
                return Some(AppRequest::Swap(SwapTarget::Next));
            }
            match structure.get::<i32>("index") {
                Ok(index) => match usize::try_from(index) {
                    Ok(index) => Some(AppRequest::Swap(SwapTarget::Index(index))),
                    Err(_) => {
                        warn!("Ignoring swap request with negative index {}", index);
                        None
                    }
                },
                Err(err) => {
                    warn!("There is no integer field named \"index\": {}", err);
                    None
                }
            }
        }
        _ => None,
    }
}

/// Build an application message carrying `request`, posted on behalf of `src`.
pub fn application_message(request: &AppRequest, src: &impl IsA<gst::Object>) -> gst::Message {
    gst::message::Application::builder(to_structure(request))
        .src(src)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_shapes() {
        gst::init().unwrap();

        let s = to_structure(&AppRequest::Swap(SwapTarget::Index(3)));
        assert_eq!(s.name().as_str(), SWAP_MESSAGE);
        assert_eq!(s.get::<i32>("index").unwrap(), 3);

        let s = to_structure(&AppRequest::Swap(SwapTarget::Next));
        assert_eq!(s.fields().count(), 0);

        assert_eq!(to_structure(&AppRequest::Quit).name().as_str(), QUIT_MESSAGE);
    }

    #[test]
    fn test_decode() {
        gst::init().unwrap();

        for request in [
            AppRequest::Quit,
            AppRequest::Swap(SwapTarget::Next),
            AppRequest::Swap(SwapTarget::Index(2)),
        ] {
            assert_eq!(from_structure(&to_structure(&request)), Some(request));
        }

        let negative = gst::Structure::builder(SWAP_MESSAGE).field("index", -1i32).build();
        assert_eq!(from_structure(&negative), None);

        let wrong_type = gst::Structure::builder(SWAP_MESSAGE).field("index", "two").build();
        assert_eq!(from_structure(&wrong_type), None);

        let foreign = gst::Structure::new_empty("gtk-button-clicked");
        assert_eq!(from_structure(&foreign), None);
    }

    #[test]
    fn test_application_message_source() {
        gst::init().unwrap();

        let pipeline = gst::Pipeline::with_name("poster");
        let msg = application_message(&AppRequest::Quit, &pipeline);
        assert_eq!(msg.src().map(|s| s.name().to_string()).as_deref(), Some("poster"));
        assert_eq!(msg.structure().map(|s| s.name().to_string()).as_deref(), Some(QUIT_MESSAGE));
    }
}

//! The surface the editor is mounted on.

use crate::config::LayoutConfig;
use crate::error::BootstrapError;

/// Id of the only mount point the editor uses.
pub const CONTAINER_ID: &str = "container";

/// A named region of the surface the editor renders into.
///
/// Only obtainable from [`Surface::find`] or [`resolve`], so holding one means
/// the region exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MountPoint {
    id: String,
}

impl MountPoint {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// egui id that scopes the area and every widget inside it.
    pub fn egui_id(&self) -> egui::Id {
        egui::Id::new(("vidixy_mount", self.id.as_str()))
    }
}

/// The set of mount points available at startup.
#[derive(Clone, Debug, Default)]
pub struct Surface {
    mount_points: Vec<String>,
}

impl Surface {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mount_points: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_layout(layout: &LayoutConfig) -> Self {
        Self::from_ids(layout.mount_points.iter().cloned())
    }

    pub fn find(&self, id: &str) -> Result<MountPoint, BootstrapError> {
        resolve(id, |id| self.mount_points.iter().any(|m| m == id).then_some(()))
            .map(|(mount, ())| mount)
    }
}

/// Looks `id` up with `lookup` and pairs whatever it found with the mount point.
///
/// On the web `lookup` finds the canvas element, so the canvas and the mount
/// point come from the same lookup.
pub fn resolve<T>(
    id: &str,
    lookup: impl FnOnce(&str) -> Option<T>,
) -> Result<(MountPoint, T), BootstrapError> {
    match lookup(id) {
        Some(found) => Ok((MountPoint { id: id.to_string() }, found)),
        None => Err(BootstrapError::MountNotFound(id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_has_the_container() {
        let surface = Surface::from_layout(&LayoutConfig::default());
        let mount = surface.find(CONTAINER_ID).unwrap();
        assert_eq!(mount.id(), CONTAINER_ID);
    }

    #[test]
    fn missing_mount_point_is_an_error() {
        let surface = Surface::from_ids(["sidebar"]);
        match surface.find(CONTAINER_ID) {
            Err(BootstrapError::MountNotFound(id)) => assert_eq!(id, CONTAINER_ID),
            other => panic!("expected MountNotFound, got {:?}", other),
        }
        assert!(Surface::default().find(CONTAINER_ID).is_err());
    }

    #[test]
    fn mount_ids_are_distinct() {
        let surface = Surface::from_ids(["container", "preview"]);
        let a = surface.find("container").unwrap();
        let b = surface.find("preview").unwrap();
        assert_ne!(a.egui_id(), b.egui_id());
    }

    #[test]
    fn resolve_pairs_the_element_with_its_mount_point() {
        let (mount, element) = resolve(CONTAINER_ID, |id| Some(format!("<canvas id={id}>"))).unwrap();
        assert_eq!(mount.id(), CONTAINER_ID);
        assert_eq!(element, "<canvas id=container>");

        match resolve(CONTAINER_ID, |_| None::<()>) {
            Err(BootstrapError::MountNotFound(id)) => assert_eq!(id, CONTAINER_ID),
            other => panic!("expected MountNotFound, got {:?}", other),
        }
    }
}

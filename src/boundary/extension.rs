//! Folding extension boundaries into their parent.

use geo::BooleanOps;
use hashbrown::HashMap;
use tracing::{debug, warn};

use super::Boundary;

/// Union every boundary marked as an extension into the boundary it
/// extends, dropping the extension itself.
///
/// Extensions whose parent is missing are kept as standalone boundaries.
pub fn merge_extensions(boundaries: Vec<Boundary>) -> Vec<Boundary> {
    let (extensions, mut merged): (Vec<Boundary>, Vec<Boundary>) = boundaries
        .into_iter()
        .partition(|b| b.extension_of.is_some());

    let index: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(i, b)| (b.id.clone(), i))
        .collect();

    for extension in extensions {
        let parent = extension
            .extension_of
            .as_ref()
            .and_then(|id| index.get(id).copied());

        match parent {
            Some(idx) => {
                let target = &mut merged[idx];
                debug!("Merging extension {} into {}", extension.id, target.id);
                target.geometry = target.geometry.union(&extension.geometry);
            }
            None => {
                warn!(
                    "Parent {:?} of extension {} not found, keeping it on its own",
                    extension.extension_of, extension.id
                );
                merged.push(extension);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{polygon, Area, MultiPolygon};

    fn boundary(id: &str, extension_of: Option<&str>, geometry: MultiPolygon<f64>) -> Boundary {
        Boundary {
            id: id.to_string(),
            name: None,
            extension_of: extension_of.map(String::from),
            geometry,
        }
    }

    #[test]
    fn test_extension_is_unioned_into_parent() {
        let main = polygon![
            (x: 0.0, y: 0.0),
            (x: 4.0, y: 0.0),
            (x: 4.0, y: 4.0),
            (x: 0.0, y: 4.0),
        ];
        let ext = polygon![
            (x: 4.0, y: 0.0),
            (x: 6.0, y: 0.0),
            (x: 6.0, y: 4.0),
            (x: 4.0, y: 4.0),
        ];
        let merged = merge_extensions(vec![
            boundary("EDGG-EXT", Some("EDGG"), MultiPolygon::new(vec![ext])),
            boundary("EDGG", None, MultiPolygon::new(vec![main])),
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "EDGG");
        // Shared edge dissolves into one polygon
        assert_eq!(merged[0].geometry.0.len(), 1);
        assert_relative_eq!(merged[0].geometry.unsigned_area(), 24.0, epsilon = 1e-9);
    }

    #[test]
    fn test_orphan_extension_kept() {
        let ext = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
        ];
        let merged = merge_extensions(vec![boundary(
            "LOST",
            Some("NOWHERE"),
            MultiPolygon::new(vec![ext]),
        )]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "LOST");
    }
}

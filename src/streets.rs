//! Reduce a GeoJSON street network to the main roads.

use std::path::Path;

use geojson::{Feature, FeatureCollection, GeoJson};

use crate::errors::KnmiDataErr;

/// Values of the `highway` property that are kept.
pub const HIGHWAY_WHITELIST: [&str; 5] = ["primary", "secondary", "tertiary", "residential", "trunk"];

/// Keep only the features of a feature collection that are main roads.
///
/// Features without a `highway` property are dropped. Nothing else about the collection changes.
pub fn filter_streets(geojson_text: &str) -> Result<FeatureCollection, KnmiDataErr> {
    let mut collection = match geojson_text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection,
        _ => return Err(KnmiDataErr::NotAFeatureCollection),
    };

    let before = collection.features.len();
    collection.features.retain(is_main_road);
    log::debug!("kept {} of {} features", collection.features.len(), before);

    Ok(collection)
}

/// Filter the feature collection in `input` and write the result to `output`.
///
/// Returns the number of features kept.
pub fn filter_file(input: &Path, output: &Path) -> Result<usize, KnmiDataErr> {
    let text = std::fs::read_to_string(input)?;
    let collection = filter_streets(&text)?;

    std::fs::write(output, serde_json::to_string(&collection)?)?;
    log::info!(
        "wrote {} streets from {} to {}",
        collection.features.len(),
        input.display(),
        output.display()
    );

    Ok(collection.features.len())
}

fn is_main_road(feature: &Feature) -> bool {
    feature
        .property("highway")
        .and_then(|highway| highway.as_str())
        .map_or(false, |highway| HIGHWAY_WHITELIST.contains(&highway))
}

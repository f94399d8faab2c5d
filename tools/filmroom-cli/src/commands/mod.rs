pub mod frame;
pub mod info;
pub mod plan;
pub mod sheet;
pub mod validate;

use std::path::Path;

use filmroom_common::config::AppConfig;
use filmroom_common::error::FilmroomError;
use filmroom_project_model::{RenderProps, TemplateKind};
use filmroom_render_engine::{prepare_composition, CompositionOptions, CompositionPlan};

pub fn load_props(path: &Path) -> anyhow::Result<RenderProps> {
    if !path.exists() {
        return Err(FilmroomError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    let props =
        RenderProps::load(path).map_err(|e| anyhow::anyhow!("Failed to load props: {e}"))?;
    tracing::debug!(
        path = %path.display(),
        clips = props.clips.len(),
        rejected = props.rejected.len(),
        videos = props.videos.len(),
        "Loaded props"
    );
    Ok(props)
}

pub fn parse_template(name: Option<String>) -> anyhow::Result<Option<TemplateKind>> {
    name.map(|name| {
        TemplateKind::from_name(&name).ok_or_else(|| {
            anyhow::anyhow!("Unknown template: {name}. Use: back-to-back, first-seconds, preview")
        })
    })
    .transpose()
}

/// Prepare a plan, or `None` after telling the user there is nothing to render.
pub fn plan_or_report(
    config: &AppConfig,
    props: &RenderProps,
    options: CompositionOptions,
) -> anyhow::Result<Option<CompositionPlan>> {
    match prepare_composition(props, &config.render, options) {
        Ok(plan) => Ok(Some(plan)),
        Err(FilmroomError::DegenerateTimeline) => {
            eprintln!(
                "Nothing to render: no clip could be placed ({} invalid, {} selected).",
                props.rejected.len(),
                props.clips.len()
            );
            Ok(None)
        }
        Err(e) => Err(anyhow::anyhow!("Failed to prepare composition: {e}")),
    }
}

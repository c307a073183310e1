//! Scene description loading.
//!
//! Decodes a JSON scene description into a [`Scene`], then checks the
//! rules that span more than one object (exactly one camera).

use std::path::Path;

use serde_json::value::RawValue;
use thiserror::Error;

use super::types::ObjectDeclaration;
use crate::scene::{Scene, SceneObject};

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Scene description contains no objects")]
    Empty,

    #[error("Scene description has no camera")]
    MissingCamera,

    #[error("Scene description has more than one camera (objects {first} and {second})")]
    MultipleCameras { first: usize, second: usize },
}

impl SceneError {
    /// Line of the description the error was found on, when there is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            SceneError::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        SceneError::Parse {
            line: err.line(),
            column: err.column(),
            message: message_of(&err),
        }
    }
}

// serde_json appends " at line L column C" to the message, which the
// Display impl above already carries.
fn message_of(err: &serde_json::Error) -> String {
    let message = err.to_string();
    match message.rfind(" at line ") {
        Some(end) if err.line() > 0 => message[..end].to_string(),
        _ => message,
    }
}

/// Result type for loading operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Load a scene description file.
///
/// The scene is named after the file stem.
///
/// # Example
///
/// ```ignore
/// use whitted_core::description::load_scene;
///
/// let scene = load_scene("scenes/demo.json")?;
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
    let path = path.as_ref();
    let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("unnamed");

    log::info!("Loading scene description: {}", path.display());
    let content = std::fs::read_to_string(path)?;

    let mut scene = load_scene_from_str(&content)?;
    scene.name = name.to_string();
    Ok(scene)
}

/// Load a scene description from a JSON string.
///
/// The array is split into its elements first so that an object which fails
/// to decode or validate is reported at the line where it starts.
pub fn load_scene_from_str(content: &str) -> SceneResult<Scene> {
    let elements: Vec<&RawValue> = serde_json::from_str(content)?;
    if elements.is_empty() {
        return Err(SceneError::Empty);
    }

    let objects = elements
        .iter()
        .map(|element| decode_object(content, element))
        .collect::<SceneResult<Vec<_>>>()?;

    let scene = Scene::new("unnamed", objects);
    check_single_camera(scene.objects())?;

    for (index, object) in scene.objects().iter().enumerate() {
        log::debug!("Object {}: {}", index, object.kind_name());
    }
    for (index, light) in scene.lights() {
        log::debug!(
            "Light {}: {} at {:?}",
            index,
            if light.is_spot() { "spot" } else { "point" },
            light.position
        );
    }
    if scene.light_count() == 0 {
        log::warn!("Scene has no lights; every surface will render black");
    }

    log::info!(
        "Loaded scene: {} objects ({} surfaces, {} lights)",
        scene.len(),
        scene.surface_count(),
        scene.light_count()
    );

    Ok(scene)
}

fn decode_object(content: &str, element: &RawValue) -> SceneResult<SceneObject> {
    serde_json::from_str::<ObjectDeclaration>(element.get())
        .map(SceneObject::from)
        .map_err(|err| {
            let (line, column) = position_in(content, element.get());
            SceneError::Parse {
                line,
                column,
                message: message_of(&err),
            }
        })
}

/// 1-based line and column where `part`, a slice borrowed from `content`, begins.
fn position_in(content: &str, part: &str) -> (usize, usize) {
    let offset = (part.as_ptr() as usize)
        .checked_sub(content.as_ptr() as usize)
        .unwrap_or(0);
    let before = content.get(..offset).unwrap_or("");

    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |last| last.chars().count()) + 1;
    (line, column)
}

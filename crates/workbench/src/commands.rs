use layers::layer::{Layer, LayerId};
use runtime::command::{CommandError, Executable, Revertible};

use crate::context::Workbench;

/// Toggles a layer's visibility, remembering the previous state for undo.
pub struct SetLayerVisibility {
    layer_id: LayerId,
    visible: bool,
    previous: Option<bool>,
}

impl SetLayerVisibility {
    pub fn new(layer_id: LayerId, visible: bool) -> Self {
        Self {
            layer_id,
            visible,
            previous: None,
        }
    }
}

impl Executable<Workbench> for SetLayerVisibility {
    fn title(&self) -> &str {
        "set layer visibility"
    }

    fn execute(&mut self, ctx: &mut Workbench) -> Result<(), CommandError> {
        let layer = ctx
            .layer_mut(self.layer_id)
            .ok_or_else(|| CommandError::ExecuteFailed("unknown layer".to_string()))?;
        self.previous = Some(layer.visible());
        layer.set_visible(self.visible);
        Ok(())
    }
}

impl Revertible<Workbench> for SetLayerVisibility {
    fn revert(&mut self, ctx: &mut Workbench) -> Result<(), CommandError> {
        let previous = self
            .previous
            .take()
            .ok_or_else(|| CommandError::RevertFailed("not executed".to_string()))?;
        let layer = ctx
            .layer_mut(self.layer_id)
            .ok_or_else(|| CommandError::RevertFailed("unknown layer".to_string()))?;
        layer.set_visible(previous);
        Ok(())
    }
}

/// Recolors every feature of a layer, remembering the old colors for undo.
pub struct SetLayerColor {
    layer_id: LayerId,
    color: String,
    previous: Vec<String>,
}

impl SetLayerColor {
    pub fn new(layer_id: LayerId, color: impl Into<String>) -> Self {
        Self {
            layer_id,
            color: color.into(),
            previous: Vec::new(),
        }
    }
}

impl Executable<Workbench> for SetLayerColor {
    fn title(&self) -> &str {
        "set layer color"
    }

    fn execute(&mut self, ctx: &mut Workbench) -> Result<(), CommandError> {
        let layer = ctx
            .layer_mut(self.layer_id)
            .ok_or_else(|| CommandError::ExecuteFailed("unknown layer".to_string()))?;
        self.previous = layer
            .features()
            .iter()
            .map(|f| f.color().to_string())
            .collect();
        for feature in layer.features_mut() {
            feature.set_color(&self.color);
        }
        Ok(())
    }
}

impl Revertible<Workbench> for SetLayerColor {
    fn revert(&mut self, ctx: &mut Workbench) -> Result<(), CommandError> {
        let layer = ctx
            .layer_mut(self.layer_id)
            .ok_or_else(|| CommandError::RevertFailed("unknown layer".to_string()))?;
        let previous = std::mem::take(&mut self.previous);
        if previous.len() != layer.features().len() {
            return Err(CommandError::RevertFailed(
                "layer changed since execute".to_string(),
            ));
        }
        for (feature, color) in layer.features_mut().iter_mut().zip(previous) {
            feature.set_color(&color);
        }
        Ok(())
    }
}

use crate::error::LightError;
use crate::light::{LightConfig, Phase, PhaseController};
use std::sync::Arc;

// ===========================================================================
// ** LightGroup **
// ===========================================================================

pub struct LightGroup {
    lights: Vec<Arc<PhaseController>>,
}

impl LightGroup {
    // -----------------------------------------------------------------------

    pub fn new() -> Self {
        LightGroup { lights: Vec::new() }
    }

    // -----------------------------------------------------------------------

    pub fn add(
        &mut self,
        name: &str,
        config: LightConfig,
    ) -> Result<Arc<PhaseController>, LightError> {
        let light = Arc::new(PhaseController::named(name, config)?);
        self.lights.push(light.clone());
        Ok(light)
    }

    // -----------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    // -----------------------------------------------------------------------

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    // -----------------------------------------------------------------------

    pub fn lights(&self) -> &[Arc<PhaseController>] {
        &self.lights
    }

    // -----------------------------------------------------------------------
    // start every idle light; lights that are already running are left alone

    pub fn start_all(&self) -> Result<(), LightError> {
        for light in &self.lights {
            match light.start() {
                Ok(()) | Err(LightError::AlreadyRunning) => {}
                Err(error) => {
                    self.stop_all();
                    return Err(error);
                }
            }
        }

        Ok(())
    }

    // -----------------------------------------------------------------------

    pub fn stop_all(&self) {
        for light in &self.lights {
            light.stop();
        }
    }

    // -----------------------------------------------------------------------

    pub fn phases(&self) -> Vec<(String, Phase)> {
        self.lights
            .iter()
            .map(|light| (light.name().to_string(), light.current_phase()))
            .collect()
    }
}

impl Default for LightGroup {
    fn default() -> Self {
        LightGroup::new()
    }
}

impl Drop for LightGroup {
    fn drop(&mut self) {
        self.stop_all();
    }
}

// ===========================================================================
// ** TESTS **
// ===========================================================================

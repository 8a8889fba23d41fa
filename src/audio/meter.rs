/// On-screen volume readout. Runs on its own continuation flag, so it keeps
/// updating through game over until stopped explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VolumeMeter {
    running: bool,
    level: f64,
}

impl VolumeMeter {
    pub fn activate(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn update(&mut self, volume: f64) {
        if self.running {
            self.level = volume.clamp(0.0, 1.0);
        }
    }

    pub fn percent(&self) -> u32 {
        (self.level * 100.0).round() as u32
    }

    pub fn label(&self, width: usize) -> String {
        let filled = ((self.level * width as f64).round() as usize).min(width);
        format!(
            "Mic [{}{}] {:>3}%",
            "#".repeat(filled),
            " ".repeat(width - filled),
            self.percent()
        )
    }
}

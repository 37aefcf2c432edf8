use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fernboy_gb::{GameBoy, SCREEN_HEIGHT, SCREEN_WIDTH};

pub mod save;

pub const DEFAULT_FRAMES: u32 = 60;

/// What a headless session should do.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub rom_path: PathBuf,
    pub frames: u32,
    /// Battery save location; defaults to the ROM path with an `.fsv` extension.
    pub save_path: Option<PathBuf>,
    /// Where to write the last frame as raw RGB24, if anywhere.
    pub dump_path: Option<PathBuf>,
}

impl RunOptions {
    pub fn new(rom_path: impl Into<PathBuf>) -> Self {
        Self {
            rom_path: rom_path.into(),
            frames: DEFAULT_FRAMES,
            save_path: None,
            dump_path: None,
        }
    }

    pub fn save_path(&self) -> PathBuf {
        self.save_path
            .clone()
            .unwrap_or_else(|| self.rom_path.with_extension("fsv"))
    }
}

/// Load the ROM, restore its battery save, run the requested frames and
/// write the save and frame dump back out.
pub fn run(options: &RunOptions) -> Result<()> {
    let rom = fs::read(&options.rom_path)
        .with_context(|| format!("unreadable ROM file '{}'", options.rom_path.display()))?;

    let mut gb = GameBoy::new();
    gb.load_rom(&rom)?;

    let save_path = options.save_path();
    if let Some(sram) = save::read_save(&save_path)
        .with_context(|| format!("failed to restore '{}'", save_path.display()))?
    {
        log::info!("Restored {} bytes of SRAM from '{}'", sram.len(), save_path.display());
        gb.load_sram(&sram);
    }

    for _ in 0..options.frames {
        gb.step_frame()?;
    }
    log::info!("Ran {} frames ({} machine cycles)", options.frames, gb.cycles());

    let serial = gb.serial_output();
    if !serial.is_empty() {
        log::info!("Serial output: {}", String::from_utf8_lossy(serial));
    }

    let sram = gb.sram_serialize();
    if !sram.is_empty() {
        save::write_save(&save_path, &sram)
            .with_context(|| format!("failed to write '{}'", save_path.display()))?;
    }

    if let Some(dump_path) = &options.dump_path {
        dump_frame(&gb, dump_path)?;
    }
    Ok(())
}

fn dump_frame(gb: &GameBoy, path: &Path) -> Result<()> {
    let mut rgb = vec![0u8; SCREEN_WIDTH * SCREEN_HEIGHT * 3];
    gb.video_frame(&mut rgb);
    fs::write(path, &rgb).with_context(|| format!("failed to write '{}'", path.display()))?;
    log::info!("Wrote {}x{} RGB24 frame to '{}'", SCREEN_WIDTH, SCREEN_HEIGHT, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 32 KiB MBC1+RAM+BATTERY image whose program writes 0x5A to 0xA000
    /// then loops forever.
    fn battery_rom() -> Vec<u8> {
        let mut rom = vec![0u8; 0x8000];
        rom[0x0147] = 0x03;
        rom[0x0149] = 0x02;
        rom[0x0100..0x010B].copy_from_slice(&[
            0x3E, 0x0A, // LD A,0x0A
            0xEA, 0x00, 0x00, // LD (0x0000),A
            0x3E, 0x5A, // LD A,0x5A
            0xEA, 0x00, 0xA0, // LD (0xA000),A
            0x18, // JR
        ]);
        rom[0x010B] = 0xFE; // -2
        rom
    }

    #[test]
    fn missing_rom_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&RunOptions::new(dir.path().join("missing.gb"))).unwrap_err();
        assert!(err.to_string().contains("unreadable ROM file"));
    }

    #[test]
    fn session_writes_save_and_dump() {
        let dir = tempfile::tempdir().unwrap();
        let rom_path = dir.path().join("game.gb");
        fs::write(&rom_path, battery_rom()).unwrap();

        let mut options = RunOptions::new(&rom_path);
        options.frames = 2;
        options.dump_path = Some(dir.path().join("frame.rgb"));
        run(&options).unwrap();

        let sram = save::read_save(&dir.path().join("game.fsv")).unwrap().unwrap();
        assert_eq!(sram.len(), 0x2000);
        assert_eq!(sram[0], 0x5A);

        let dump = fs::read(dir.path().join("frame.rgb")).unwrap();
        assert_eq!(dump.len(), SCREEN_WIDTH * SCREEN_HEIGHT * 3);
    }

    #[test]
    fn corrupt_save_aborts_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let rom_path = dir.path().join("game.gb");
        fs::write(&rom_path, battery_rom()).unwrap();
        fs::write(dir.path().join("game.fsv"), b"garbage").unwrap();

        assert!(run(&RunOptions::new(&rom_path)).is_err());
    }
}

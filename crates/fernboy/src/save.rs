use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

const MAGIC: &[u8; 4] = b"FSV\0";
const HEADER_LEN: usize = MAGIC.len() + 4;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("save file does not start with the FSV magic")]
    BadMagic,

    #[error("save file declares {declared} bytes of SRAM but holds {actual}")]
    Truncated { declared: usize, actual: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Wrap raw SRAM bytes in the ".fsv" container: magic, LE u32 length, data.
pub fn encode_fsv(sram: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + sram.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&(sram.len() as u32).to_le_bytes());
    out.extend_from_slice(sram);
    out
}

/// Extract the SRAM bytes from a ".fsv" container. Bytes past the declared
/// length are ignored.
pub fn decode_fsv(bytes: &[u8]) -> Result<&[u8], SaveError> {
    if bytes.len() < MAGIC.len() || &bytes[..MAGIC.len()] != MAGIC {
        return Err(SaveError::BadMagic);
    }
    let body = &bytes[MAGIC.len()..];
    let Some((len, data)) = body.split_first_chunk::<4>() else {
        return Err(SaveError::Truncated {
            declared: 0,
            actual: 0,
        });
    };

    let declared = u32::from_le_bytes(*len) as usize;
    if data.len() < declared {
        return Err(SaveError::Truncated {
            declared,
            actual: data.len(),
        });
    }
    Ok(&data[..declared])
}

pub fn write_save(path: &Path, sram: &[u8]) -> Result<(), SaveError> {
    fs::write(path, encode_fsv(sram))?;
    Ok(())
}

/// Read a save file. A missing file is `Ok(None)`; a corrupt one is an error.
pub fn read_save(path: &Path) -> Result<Option<Vec<u8>>, SaveError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    decode_fsv(&bytes).map(|sram| Some(sram.to_vec()))
}

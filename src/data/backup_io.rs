use {
    super::backup::BackupError,
    std::{
        fs::File,
        io::{BufWriter, Read, Write},
        path::Path,
    },
};

fn io_error(path: &Path, source: std::io::Error) -> BackupError {
    BackupError::Io {
        path: path.display().to_string(),
        source,
    }
}

pub fn write_backup(path: &Path, json: &str) -> Result<(), BackupError> {
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(json.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| io_error(path, e))?;
    Ok(())
}

/// Raw text of a backup file. Parsing happens in `BackupDocument::parse`.
pub fn read_backup(path: &Path) -> Result<String, BackupError> {
    let mut file = File::open(path).map_err(|e| io_error(path, e))?;
    let mut json = String::new();
    file.read_to_string(&mut json)
        .map_err(|e| io_error(path, e))?;
    Ok(json)
}

//! メタデータ（更新日時・アクセス日時）を保ったファイルコピー

use std::fs::{self, FileTimes, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// `src` を `dest_dir` 直下に同名でコピーし、コピー先のパスを返す
pub fn copy_preserving(src: &Path, dest_dir: &Path) -> io::Result<PathBuf> {
    let file_name = src.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("ファイル名がありません: {}", src.display()),
        )
    })?;
    let dest = dest_dir.join(file_name);

    // 同一ファイルへのコピーは fs::copy が切り詰めて中身を失う
    if dest.exists() && fs::canonicalize(src)? == fs::canonicalize(&dest)? {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("コピー元とコピー先が同じファイルです: {}", src.display()),
        ));
    }

    // fs::copy はパーミッションも複製する
    fs::copy(src, &dest)?;

    let metadata = fs::metadata(src)?;
    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    OpenOptions::new().write(true).open(&dest)?.set_times(times)?;

    Ok(dest)
}

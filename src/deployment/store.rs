//! Local persistence: deployment counter, hash files, and the output archive.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::blockchain::types::DeployedContract;
use crate::deployment::error::{DeployError, DeployResult};
use crate::deployment::plan::ContractKind;

const CONTRACT_HASH_SUFFIX: &str = "ContractHash";
const PACKAGE_HASH_SUFFIX: &str = "PackageHash";

/// Plain-text deployment count, appended to contract names.
///
/// Not safe against concurrent runs; read once at start and bumped once at
/// the end of a complete run.
#[derive(Debug, Clone)]
pub struct DeploymentCounter {
    path: PathBuf,
}

impl DeploymentCounter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> DeployResult<u64> {
        let content = fs::read_to_string(&self.path).map_err(|e| DeployError::io(&self.path, e))?;
        content
            .trim()
            .parse()
            .map_err(|_| DeployError::InvalidCounter {
                path: self.path.clone(),
                content,
            })
    }

    pub fn write(&self, value: u64) -> DeployResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| DeployError::io(parent, e))?;
        }
        fs::write(&self.path, value.to_string()).map_err(|e| DeployError::io(&self.path, e))
    }

    /// Add one to the stored count and return the new value.
    pub fn increment(&self) -> DeployResult<u64> {
        let next = self.read()? + 1;
        self.write(next)?;
        tracing::info!(path = %self.path.display(), count = next, "Deployment count updated");
        Ok(next)
    }
}

/// Hash files in the output directory, one pair per contract.
#[derive(Debug, Clone)]
pub struct HashStore {
    dir: PathBuf,
}

impl HashStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn contract_hash_path(&self, kind: ContractKind) -> PathBuf {
        self.dir
            .join(format!("{}{}", kind.output_stem(), CONTRACT_HASH_SUFFIX))
    }

    pub fn package_hash_path(&self, kind: ContractKind) -> PathBuf {
        self.dir
            .join(format!("{}{}", kind.output_stem(), PACKAGE_HASH_SUFFIX))
    }

    /// Write both hash files, overwriting earlier runs.
    pub fn write(&self, kind: ContractKind, contract: &DeployedContract) -> DeployResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| DeployError::io(&self.dir, e))?;

        let contract_path = self.contract_hash_path(kind);
        fs::write(&contract_path, &contract.contract_hash)
            .map_err(|e| DeployError::io(&contract_path, e))?;
        let package_path = self.package_hash_path(kind);
        fs::write(&package_path, &contract.package_hash)
            .map_err(|e| DeployError::io(&package_path, e))?;

        tracing::debug!(contract = %kind, dir = %self.dir.display(), "Hashes written");
        Ok(())
    }

    /// Read the hashes persisted by an earlier run.
    pub fn read(&self, kind: ContractKind) -> DeployResult<DeployedContract> {
        let read = |path: PathBuf| {
            fs::read_to_string(&path)
                .map(|s| s.trim().to_string())
                .map_err(|e| DeployError::io(path, e))
        };
        Ok(DeployedContract {
            contract_hash: read(self.contract_hash_path(kind))?,
            package_hash: read(self.package_hash_path(kind))?,
        })
    }
}

/// Zip every regular file of `dir` into `archive`, under the directory's name.
///
/// Returns the number of files archived.
pub fn archive_directory(dir: &Path, archive: &Path) -> DeployResult<usize> {
    let root = dir
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("hashes")
        .to_string();

    // An earlier archive written into `dir` must not archive itself.
    let existing_archive = fs::canonicalize(archive).ok();

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| DeployError::io(dir, e))? {
        let path = entry.map_err(|e| DeployError::io(dir, e))?.path();
        if !path.is_file() {
            continue;
        }
        if existing_archive.is_some() && fs::canonicalize(&path).ok() == existing_archive {
            continue;
        }
        entries.push(path);
    }
    entries.sort();

    if let Some(parent) = archive.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| DeployError::io(parent, e))?;
    }
    let file = File::create(archive).map_err(|e| DeployError::io(archive, e))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut buffer = Vec::new();
    for path in &entries {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            tracing::warn!(path = %path.display(), "Skipping file with non UTF-8 name");
            continue;
        };
        buffer.clear();
        File::open(path)
            .and_then(|mut f| f.read_to_end(&mut buffer))
            .map_err(|e| DeployError::io(path, e))?;

        zip.start_file(format!("{root}/{name}"), options)
            .map_err(|e| DeployError::Archive(e.to_string()))?;
        zip.write_all(&buffer)
            .map_err(|e| DeployError::io(archive, e))?;
    }
    zip.finish()
        .map_err(|e| DeployError::Archive(e.to_string()))?;

    tracing::info!(
        archive = %archive.display(),
        files = entries.len(),
        "Output archive created"
    );
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn contract(tag: &str) -> DeployedContract {
        DeployedContract {
            contract_hash: format!("{tag}c0ffee"),
            package_hash: format!("{tag}beef"),
        }
    }

    #[test]
    fn test_counter_increments() {
        let dir = TempDir::new().unwrap();
        let counter = DeploymentCounter::new(dir.path().join("deploymentCount"));
        fs::write(counter.path(), "0").unwrap();

        assert_eq!(counter.increment().unwrap(), 1);
        assert_eq!(counter.increment().unwrap(), 2);
        assert_eq!(fs::read_to_string(counter.path()).unwrap(), "2");
    }

    #[test]
    fn test_counter_tolerates_whitespace() {
        let dir = TempDir::new().unwrap();
        let counter = DeploymentCounter::new(dir.path().join("deploymentCount"));
        fs::write(counter.path(), " 41\n").unwrap();
        assert_eq!(counter.read().unwrap(), 41);
    }

    #[test]
    fn test_counter_errors() {
        let dir = TempDir::new().unwrap();
        let counter = DeploymentCounter::new(dir.path().join("deploymentCount"));
        assert!(matches!(counter.read().unwrap_err(), DeployError::Io { .. }));

        fs::write(counter.path(), "three").unwrap();
        assert!(matches!(
            counter.read().unwrap_err(),
            DeployError::InvalidCounter { ref content, .. } if content == "three"
        ));
    }

    #[test]
    fn test_counter_write_creates_parent() {
        let dir = TempDir::new().unwrap();
        let counter = DeploymentCounter::new(dir.path().join("nested/deploymentCount"));
        counter.write(5).unwrap();
        assert_eq!(counter.read().unwrap(), 5);
    }

    #[test]
    fn test_hash_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = HashStore::new(dir.path().join("hashes"));

        store.write(ContractKind::Minter, &contract("1")).unwrap();
        store.write(ContractKind::Minter, &contract("2")).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("hashes/minterContractHash")).unwrap(),
            "2c0ffee"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("hashes/minterPackageHash")).unwrap(),
            "2beef"
        );
        assert_eq!(store.read(ContractKind::Minter).unwrap(), contract("2"));
    }

    #[test]
    fn test_hash_store_missing() {
        let dir = TempDir::new().unwrap();
        let store = HashStore::new(dir.path());
        let err = store.read(ContractKind::Ownable).unwrap_err();
        assert!(err.to_string().contains("ownableContractHash"));
    }

    #[test]
    fn test_archive_directory() {
        let dir = TempDir::new().unwrap();
        let store = HashStore::new(dir.path().join("hashes"));
        store.write(ContractKind::Erc20Token, &contract("1")).unwrap();
        store.write(ContractKind::Ownable, &contract("2")).unwrap();
        fs::create_dir(store.dir().join("nested")).unwrap();

        let archive = dir.path().join("hashes.zip");
        let count = archive_directory(store.dir(), &archive).unwrap();
        assert_eq!(count, 4);

        let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        assert_eq!(zip.len(), 4);
        let mut content = String::new();
        zip.by_name("hashes/ownablePackageHash")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "2beef");
    }

    #[test]
    fn test_archive_inside_directory_skips_itself() {
        let dir = TempDir::new().unwrap();
        let store = HashStore::new(dir.path().join("hashes"));
        store.write(ContractKind::Minter, &contract("1")).unwrap();

        let archive = store.dir().join("hashes.zip");
        archive_directory(store.dir(), &archive).unwrap();
        let count = archive_directory(store.dir(), &archive).unwrap();
        assert_eq!(count, 2);

        let zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        let mut names: Vec<_> = zip.file_names().collect();
        names.sort();
        assert_eq!(names, ["hashes/minterContractHash", "hashes/minterPackageHash"]);
    }

    #[test]
    fn test_archive_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = archive_directory(&dir.path().join("absent"), &dir.path().join("out.zip")).unwrap_err();
        assert!(matches!(err, DeployError::Io { .. }));
    }
}

use sha2::{Digest, Sha256};

pub fn hash_file(path: &std::path::Path) -> anyhow::Result<String> {
	let mut hasher = Sha256::default();
	let mut file = std::fs::File::open(path)?;
	std::io::copy(&mut file, &mut hasher)?;
	let res = hasher.finalize();
	Ok(base16ct::lower::encode_string(&res))
}

#[cfg(test)]
mod hash_tests {
	use super::*;

	#[test]
	fn hashes_follow_contents() -> anyhow::Result<()> {
		let dir = tempfile::tempdir()?;
		let write = |name: &str, contents: &[u8]| -> anyhow::Result<std::path::PathBuf> {
			let path = dir.path().join(name);
			std::fs::write(&path, contents)?;
			Ok(path)
		};

		let a = hash_file(&write("a.json", b"{}")?)?;
		let b = hash_file(&write("b.json", b"{}")?)?;
		let c = hash_file(&write("c.json", b"[]")?)?;

		assert_eq!(a, b);
		assert_ne!(a, c);
		assert_eq!(a.len(), 64);
		assert!(hash_file(&dir.path().join("missing.json")).is_err());
		Ok(())
	}
}

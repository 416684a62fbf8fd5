/* Driver: composes the six emitters and writes their output in a fixed
 * order (CommonHeader, CommonImpl, ServiceHeader, ServiceImpl, ProxyHeader,
 * ProxyImpl), per §6. Owns every filesystem side effect: directory
 * creation and truncate-on-exists file writes. */

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::emit::{common, proxy, service};
use crate::ir::Document;

pub struct GeneratedFiles {
    pub paths: Vec<PathBuf>,
}

pub fn generate(
    doc: &Document,
    base_name: &str,
    output_dir: &Path,
    verbose: bool,
) -> anyhow::Result<GeneratedFiles> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let artifacts: [(&str, String); 6] = [
        ("Common.h", common::emit_common_header(doc, base_name)?),
        ("Common.cpp", common::emit_common_impl(doc, base_name)?),
        ("Service.h", service::emit_service_header(doc, base_name)?),
        ("Service.cpp", service::emit_service_impl(doc, base_name)?),
        ("Proxy.h", proxy::emit_proxy_header(doc, base_name)?),
        ("Proxy.cpp", proxy::emit_proxy_impl(doc, base_name)?),
    ];

    let mut paths = Vec::with_capacity(artifacts.len());
    for (suffix, text) in artifacts {
        let file_name = format!("{base_name}{suffix}");
        let path = output_dir.join(&file_name);
        std::fs::write(&path, text)
            .with_context(|| format!("failed to write {}", path.display()))?;
        if verbose {
            println!("[~] wrote {}", path.display());
        }
        paths.push(path);
    }

    Ok(GeneratedFiles { paths })
}

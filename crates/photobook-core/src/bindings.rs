//! TypeScript definitions for the presentation-facing types.

use crate::animation::{Easing, SettlePlan};
use crate::book::BookSnapshot;
use crate::effect::{Effect, Surface};
use crate::page::{Direction, PageId, Phase, TurningPage};
use crate::sequence::{CoverSide, Face, ImageRef};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn export_single_type<T: TS + 'static>(out_dir: &Path) -> Result<()> {
    T::export_all_to(out_dir)
        .with_context(|| format!("Failed to export {}", T::ident()))
}

/// Replace every `.ts` file in `out_dir` with freshly generated bindings
/// plus an `index.ts` re-exporting them.
pub fn export_ts_bindings(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    for entry in
        fs::read_dir(out_dir).with_context(|| format!("Failed to list {}", out_dir.display()))?
    {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", out_dir.display()))?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("ts") {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
    }

    export_single_type::<Effect>(out_dir)?;
    export_single_type::<Surface>(out_dir)?;
    export_single_type::<Face>(out_dir)?;
    export_single_type::<CoverSide>(out_dir)?;
    export_single_type::<Direction>(out_dir)?;
    export_single_type::<Phase>(out_dir)?;
    export_single_type::<PageId>(out_dir)?;
    export_single_type::<TurningPage>(out_dir)?;
    export_single_type::<SettlePlan>(out_dir)?;
    export_single_type::<Easing>(out_dir)?;
    export_single_type::<ImageRef>(out_dir)?;
    export_single_type::<BookSnapshot>(out_dir)?;

    let index_content = r#"export type { Effect } from "./Effect";
export type { Surface } from "./Surface";
export type { Face } from "./Face";
export type { CoverSide } from "./CoverSide";
export type { Direction } from "./Direction";
export type { Phase } from "./Phase";
export type { PageId } from "./PageId";
export type { TurningPage } from "./TurningPage";
export type { SettlePlan } from "./SettlePlan";
export type { Easing } from "./Easing";
export type { ImageRef } from "./ImageRef";
export type { BookSnapshot } from "./BookSnapshot";
"#;

    let index_path = out_dir.join("index.ts");
    fs::write(&index_path, index_content)
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    Ok(())
}

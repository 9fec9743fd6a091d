//! CopyLayerMaterialToObject 命令
//!
//! 仅材质的简化变体：对所有选中对象（含块实例自身的属性）
//! 就地应用材质覆盖，不走定义克隆路径。

use blockcad_core::document::{Document, ObjectTypeFilter};
use blockcad_core::overrides::apply_overrides;
use tracing::error;

use crate::command::{Command, CommandKind, CommandStatus};
use crate::input::{CommandInput, Response};

/// 复制图层材质
pub struct CopyLayerMaterialCommand;

impl Command for CopyLayerMaterialCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::CopyLayerMaterial
    }

    fn run(&self, doc: &mut Document, input: &mut dyn CommandInput) -> CommandStatus {
        let filter = ObjectTypeFilter::for_attribute_copy();
        let selection = match input.get_objects(doc, "Select objects to change material", &filter, &mut [])
        {
            Response::Value(ids) if !ids.is_empty() => ids,
            _ => return CommandStatus::Cancel,
        };

        for id in selection {
            let Some(object) = doc.objects.get(id) else {
                continue;
            };
            let attributes = object.attributes.clone();
            let Some(layer) = doc.layer_of(&attributes).cloned() else {
                continue;
            };

            let updated = apply_overrides(&layer, &attributes, true, false);
            if let Err(e) = doc.objects.commit(id, updated) {
                error!("Failed to commit material change to {}: {}", id, e);
                return CommandStatus::Failure;
            }
        }

        doc.redraw_all();
        CommandStatus::Success
    }
}

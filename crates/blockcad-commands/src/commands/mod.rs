//! 具体的命令实现
//!
//! 每个命令对应一个独立的实现

mod blocks_by_layers;
mod copy_layer_attributes;
mod copy_layer_material;

pub use blocks_by_layers::BlocksByLayersCommand;
pub use copy_layer_attributes::CopyLayerAttributesCommand;
pub use copy_layer_material::CopyLayerMaterialCommand;

use crate::command::{Command, CommandKind};

/// 创建指定类型的命令
pub fn create_command(kind: CommandKind) -> Box<dyn Command> {
    match kind {
        CommandKind::BlocksByLayers => Box::new(BlocksByLayersCommand),
        CommandKind::CopyLayerAttributes => Box::new(CopyLayerAttributesCommand),
        CommandKind::CopyLayerMaterial => Box::new(CopyLayerMaterialCommand),
    }
}

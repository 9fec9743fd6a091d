//! BlocksByLayers 命令
//!
//! 把选中对象按图层分组，每组创建一个名为
//! `{主名}_{图层名}` 的块定义，在基点放置实例，
//! 然后删除原始对象。

use blockcad_core::document::{Document, ObjectTypeFilter};
use blockcad_core::synthesis::create_blocks;
use tracing::info;

use crate::command::{Command, CommandKind, CommandStatus};
use crate::input::{CommandInput, Response};

/// 按图层创建块
pub struct BlocksByLayersCommand;

impl Command for BlocksByLayersCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::BlocksByLayers
    }

    fn run(&self, doc: &mut Document, input: &mut dyn CommandInput) -> CommandStatus {
        // 光源、夹点、幻影不能进块
        let filter = ObjectTypeFilter::for_block_members();
        let selection = match input.get_objects(doc, "Select objects to define block", &filter, &mut [])
        {
            Response::Value(ids) if !ids.is_empty() => ids,
            _ => return CommandStatus::Cancel,
        };

        let base_point = match input.get_point("Block base point") {
            Response::Value(p) => p,
            Response::Cancel => return CommandStatus::Cancel,
        };

        let name = match input.get_string("Enter block master name") {
            Response::Value(s) => s,
            Response::Cancel => return CommandStatus::Cancel,
        };

        let all_to_parent = match input.get_bool("Set colors and materials to parent", false, "No", "Yes")
        {
            Response::Value(b) => b,
            Response::Cancel => return CommandStatus::Cancel,
        };

        let name = name.trim();
        if name.is_empty() {
            return CommandStatus::Nothing;
        }

        match create_blocks(doc, &selection, base_point, name, all_to_parent) {
            Ok(created) => {
                info!(
                    "Created {} block definition(s) from {} object(s)",
                    created.len(),
                    selection.len()
                );
                doc.redraw_all();
                CommandStatus::Success
            }
            // 失败细节已在合成层写入日志；已提交的分组不回滚
            Err(_) => CommandStatus::Failure,
        }
    }
}

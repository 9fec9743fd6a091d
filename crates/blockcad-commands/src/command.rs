//! 命令接口
//!
//! 每个命令是一次短暂的线性交互流程：
//! 提示 -> 修改文档 -> 重绘 -> 汇报状态。

use blockcad_core::document::Document;

use crate::input::CommandInput;

/// 命令执行状态，返回给宿主命令循环
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// 正常完成
    Success,
    /// 用户在某个提示处取消
    Cancel,
    /// 输入为空或无效，未做任何修改
    Nothing,
    /// 执行失败（细节已写入日志）
    Failure,
}

/// 命令类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// 按图层分组创建块
    BlocksByLayers,
    /// 复制图层颜色/材质到对象（块实例走克隆路径）
    CopyLayerAttributes,
    /// 仅复制图层材质到对象
    CopyLayerMaterial,
}

impl CommandKind {
    /// 命令行名称
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::BlocksByLayers => "BlocksByLayers",
            CommandKind::CopyLayerAttributes => "CopyLayerAttributesToObject",
            CommandKind::CopyLayerMaterial => "CopyLayerMaterialToObject",
        }
    }
}

/// 命令 trait
///
/// 取消语义：任一提示返回取消时，命令立即中止；
/// 该提示之前已提交的文档修改不回滚。
pub trait Command {
    /// 命令类型
    fn kind(&self) -> CommandKind;

    /// 命令名称
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// 执行命令
    fn run(&self, doc: &mut Document, input: &mut dyn CommandInput) -> CommandStatus;
}

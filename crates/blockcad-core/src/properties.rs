//! 对象视觉属性
//!
//! 颜色、材质引用，以及对应的来源标志
//! （来自图层 / 来自对象自身 / 来自父块）。

use serde::{Deserialize, Serialize};

use crate::layer::LayerIndex;

/// RGBA 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const CYAN: Color = Color::new(0, 255, 255);
    pub const GRAY: Color = Color::new(128, 128, 128);
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// 材质表引用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub u32);

/// 颜色来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorSource {
    /// 使用所在图层的颜色
    #[default]
    FromLayer,
    /// 使用对象自身的颜色
    FromObject,
    /// 使用父块实例的颜色
    FromParent,
}

/// 材质来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MaterialSource {
    /// 使用所在图层的材质
    #[default]
    FromLayer,
    /// 使用对象自身的材质
    FromObject,
    /// 使用父块实例的材质
    FromParent,
}

/// 对象属性记录
///
/// 文档中每个对象（含块实例、块定义成员）携带一份。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectAttributes {
    /// 所在图层
    pub layer: LayerIndex,
    /// 颜色来源标志
    pub color_source: ColorSource,
    /// 对象自身颜色（仅当 color_source 为 FromObject 时生效）
    pub color: Color,
    /// 材质来源标志
    pub material_source: MaterialSource,
    /// 对象自身材质（None 表示未赋材质）
    pub material: Option<MaterialId>,
}

impl ObjectAttributes {
    /// 新建挂在指定图层上的默认属性（颜色/材质均随图层）
    pub fn on_layer(layer: LayerIndex) -> Self {
        Self {
            layer,
            color_source: ColorSource::FromLayer,
            color: Color::default(),
            material_source: MaterialSource::FromLayer,
            material: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources_follow_layer() {
        let attrs = ObjectAttributes::on_layer(LayerIndex(0));
        assert_eq!(attrs.color_source, ColorSource::FromLayer);
        assert_eq!(attrs.material_source, MaterialSource::FromLayer);
        assert_eq!(attrs.material, None);
    }
}

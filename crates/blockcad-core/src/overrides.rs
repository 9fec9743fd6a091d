//! 属性覆盖策略
//!
//! 把图层的显示颜色/渲染材质复制到对象属性上的纯函数。
//! 无副作用，调用方负责把返回的记录提交回文档。

use crate::layer::Layer;
use crate::properties::{ColorSource, MaterialSource, ObjectAttributes};

/// 应用图层颜色/材质覆盖
///
/// - `use_material`: 材质来源改为"来自对象"，若图层有有效材质引用
///   则复制该引用；图层无材质时引用保持不变（静默跳过，不算错误）。
/// - `use_color`: 颜色来源改为"来自对象"，并无条件复制图层颜色
///   （颜色不存在无效值）。
/// - 两个开关都关闭时原样返回。
pub fn apply_overrides(
    layer: &Layer,
    attributes: &ObjectAttributes,
    use_material: bool,
    use_color: bool,
) -> ObjectAttributes {
    let mut result = attributes.clone();

    if use_material {
        result.material_source = MaterialSource::FromObject;
        if let Some(material) = layer.material {
            result.material = Some(material);
        }
    }

    if use_color {
        result.color_source = ColorSource::FromObject;
        result.color = layer.color;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::LayerIndex;
    use crate::properties::{Color, MaterialId};

    fn layer_with_material() -> Layer {
        Layer::new("Wall", Color::RED).with_material(MaterialId(7))
    }

    #[test]
    fn test_both_flags_off_is_identity() {
        let layer = layer_with_material();
        let attrs = ObjectAttributes::on_layer(LayerIndex(1));
        let result = apply_overrides(&layer, &attrs, false, false);
        assert_eq!(result, attrs);
    }

    #[test]
    fn test_color_copied_unconditionally() {
        let layer = layer_with_material();
        let attrs = ObjectAttributes::on_layer(LayerIndex(1));
        let result = apply_overrides(&layer, &attrs, false, true);

        assert_eq!(result.color_source, ColorSource::FromObject);
        assert_eq!(result.color, Color::RED);
        // 材质字段不受影响
        assert_eq!(result.material_source, attrs.material_source);
        assert_eq!(result.material, attrs.material);
    }

    #[test]
    fn test_material_copied_when_layer_has_one() {
        let layer = layer_with_material();
        let attrs = ObjectAttributes::on_layer(LayerIndex(1));
        let result = apply_overrides(&layer, &attrs, true, false);

        assert_eq!(result.material_source, MaterialSource::FromObject);
        assert_eq!(result.material, Some(MaterialId(7)));
    }

    #[test]
    fn test_material_sentinel_sets_flag_but_keeps_reference() {
        // 图层无材质：来源标志仍然切到"来自对象"，引用保持原值
        let layer = Layer::new("Bare", Color::GREEN);
        let mut attrs = ObjectAttributes::on_layer(LayerIndex(1));
        attrs.material = Some(MaterialId(3));

        let result = apply_overrides(&layer, &attrs, true, false);
        assert_eq!(result.material_source, MaterialSource::FromObject);
        assert_eq!(result.material, Some(MaterialId(3)));
    }

    #[test]
    fn test_idempotent() {
        let layer = layer_with_material();
        let attrs = ObjectAttributes::on_layer(LayerIndex(1));

        let once = apply_overrides(&layer, &attrs, true, true);
        let twice = apply_overrides(&layer, &once, true, true);
        assert_eq!(once, twice);
    }
}

//! CopyLayerAttributesToObject 命令
//!
//! 把图层的颜色/材质复制到选中对象上。普通对象就地覆盖属性；
//! 块实例走定义克隆路径：按父图层派生变体定义
//! （已存在则复用），重新放置实例并删除原实例。

use blockcad_core::document::{Document, ObjectTypeFilter};
use blockcad_core::synthesis::clone_with_overrides;
use tracing::error;

use crate::command::{Command, CommandKind, CommandStatus};
use crate::input::{CommandInput, OptionToggle, Response};

/// 复制图层颜色与材质
pub struct CopyLayerAttributesCommand;

impl Command for CopyLayerAttributesCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::CopyLayerAttributes
    }

    fn run(&self, doc: &mut Document, input: &mut dyn CommandInput) -> CommandStatus {
        let filter = ObjectTypeFilter::for_attribute_copy();
        let mut toggles = [
            OptionToggle::new("Material", true, "False", "True"),
            OptionToggle::new("Color", true, "False", "True"),
        ];

        let selection = match input.get_objects(
            doc,
            "Select objects to apply layer color and material",
            &filter,
            &mut toggles,
        ) {
            Response::Value(ids) if !ids.is_empty() => ids,
            _ => return CommandStatus::Cancel,
        };

        let use_material = toggles[0].value;
        let use_color = toggles[1].value;

        for id in selection {
            if let Err(e) = clone_with_overrides(doc, id, use_material, use_color) {
                error!("Failed to apply layer attributes to {}: {}", id, e);
                return CommandStatus::Failure;
            }
        }

        doc.redraw_all();
        CommandStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockcad_core::document::{DefinitionMember, ObjectContent, ObjectId};
    use blockcad_core::geometry::{Geometry, Line};
    use blockcad_core::layer::{Layer, LayerIndex};
    use blockcad_core::math::{Point3, Transform3};
    use blockcad_core::properties::{Color, ColorSource, MaterialId, MaterialSource, ObjectAttributes};

    use crate::scripted::ScriptedInput;

    fn line() -> Geometry {
        Geometry::Line(Line::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)))
    }

    /// 一个几何对象和一个块实例，挂在带颜色和材质的图层上
    fn document() -> (Document, ObjectId, ObjectId) {
        let mut doc = Document::new();
        let layer = doc
            .layers
            .add_layer(Layer::new("Facade", Color::CYAN).with_material(MaterialId(4)));

        let plain = doc
            .objects
            .add_geometry(line(), ObjectAttributes::on_layer(layer));

        let members = vec![DefinitionMember {
            content: ObjectContent::Geometry(line()),
            attributes: ObjectAttributes::on_layer(LayerIndex(0)),
        }];
        let definition = doc
            .instance_definitions
            .add("Panel", "", Point3::origin(), members)
            .unwrap();
        let instance = doc.objects.add_instance(
            definition,
            Transform3::identity(),
            ObjectAttributes::on_layer(layer),
        );

        (doc, plain, instance)
    }

    #[test]
    fn test_plain_object_updated_in_place() {
        let (mut doc, plain, _) = document();
        let mut input = ScriptedInput::new().pick_objects(vec![plain]);

        let status = CopyLayerAttributesCommand.run(&mut doc, &mut input);
        assert_eq!(status, CommandStatus::Success);

        let attrs = &doc.objects.get(plain).unwrap().attributes;
        assert_eq!(attrs.color_source, ColorSource::FromObject);
        assert_eq!(attrs.color, Color::CYAN);
        assert_eq!(attrs.material_source, MaterialSource::FromObject);
        assert_eq!(attrs.material, Some(MaterialId(4)));
    }

    #[test]
    fn test_instance_cloned_with_derived_definition() {
        let (mut doc, _, instance) = document();
        let mut input = ScriptedInput::new().pick_objects(vec![instance]);

        let status = CopyLayerAttributesCommand.run(&mut doc, &mut input);
        assert_eq!(status, CommandStatus::Success);

        // 默认开关均为 true -> 代码 CM
        let derived = doc.instance_definitions.find("Panel_CM_Facade");
        assert!(derived.is_some());
        assert!(!doc.objects.contains(instance));
    }

    #[test]
    fn test_color_toggle_off() {
        let (mut doc, plain, _) = document();
        let mut input = ScriptedInput::new()
            .pick_objects(vec![plain])
            .set_toggle("Color", false);

        let status = CopyLayerAttributesCommand.run(&mut doc, &mut input);
        assert_eq!(status, CommandStatus::Success);

        let attrs = &doc.objects.get(plain).unwrap().attributes;
        // 颜色保持随图层，材质被覆盖
        assert_eq!(attrs.color_source, ColorSource::FromLayer);
        assert_eq!(attrs.material_source, MaterialSource::FromObject);
    }

    #[test]
    fn test_cancel_leaves_document_untouched() {
        let (mut doc, plain, instance) = document();
        let before_plain = doc.objects.get(plain).unwrap().attributes.clone();
        let mut input = ScriptedInput::new().cancel_objects();

        let status = CopyLayerAttributesCommand.run(&mut doc, &mut input);
        assert_eq!(status, CommandStatus::Cancel);
        assert_eq!(doc.objects.get(plain).unwrap().attributes, before_plain);
        assert!(doc.objects.contains(instance));
    }

    #[test]
    fn test_rerun_on_clone_converges() {
        let (mut doc, _, instance) = document();
        let mut input = ScriptedInput::new().pick_objects(vec![instance]);
        CopyLayerAttributesCommand.run(&mut doc, &mut input);
        let count_after_first = doc.instance_definitions.count();

        // 找到替换实例再跑一次
        let replacement = doc
            .objects
            .iter()
            .find(|o| matches!(o.content, ObjectContent::Instance(_)))
            .map(|o| o.id)
            .unwrap();
        let mut input = ScriptedInput::new().pick_objects(vec![replacement]);
        let status = CopyLayerAttributesCommand.run(&mut doc, &mut input);

        assert_eq!(status, CommandStatus::Success);
        assert_eq!(doc.instance_definitions.count(), count_after_first);
    }
}

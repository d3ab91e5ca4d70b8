//! 3D model references.

use kiform_core::{geometry::Xyz, model::Model};
use kiform_parser::{
    Node,
    error::Result,
    keywords,
    schema::{Elision, FieldSpec, Fields, NodeBuilder},
};

use super::{
    FromNode, ToNode, child_tag,
    primitives::{decode_number, decode_switch, decode_xyz, xyz_node},
};

const ENTITY: &str = "model";
const MM_PER_INCH: f64 = 25.4;

const OPACITY: FieldSpec<f64> = FieldSpec::new("opacity", Elision::IfDefault(1.0));

keywords! {
    enum ModelTag {
        /// Legacy offset in inches.
        At => "at",
        Offset => "offset",
        Scale => "scale",
        Rotate => "rotate",
        Opacity => "opacity",
        Hide => "hide",
    }
}

impl FromNode for Model {
    fn from_node(node: &Node) -> Result<Self> {
        let mut fields = Fields::expect(node, &[ENTITY], ENTITY)?;
        let path = fields.next_text("path")?;
        let mut hide = fields.flag("hide");

        let mut legacy_at = None;
        let mut offset = None;
        let mut scale = None;
        let mut rotate = None;
        let mut opacity = None;
        for child in fields.nodes() {
            match child_tag::<ModelTag>(&fields, child)? {
                ModelTag::At => fields.set_once(&mut legacy_at, child, decode_xyz(child, ENTITY)?)?,
                ModelTag::Offset => fields.set_once(&mut offset, child, decode_xyz(child, ENTITY)?)?,
                ModelTag::Scale => fields.set_once(&mut scale, child, decode_xyz(child, ENTITY)?)?,
                ModelTag::Rotate => fields.set_once(&mut rotate, child, decode_xyz(child, ENTITY)?)?,
                ModelTag::Opacity => {
                    fields.set_once(&mut opacity, child, decode_number(child, ENTITY)?)?
                }
                ModelTag::Hide => hide = decode_switch(child, ENTITY)?,
            }
        }
        fields.finish()?;

        let offset = offset
            .or_else(|| legacy_at.map(|at| at.scaled(MM_PER_INCH)))
            .unwrap_or(Xyz::ZERO);

        Ok(Model {
            path,
            hide,
            opacity,
            offset,
            scale: scale.unwrap_or(Xyz::ONE),
            rotate: rotate.unwrap_or(Xyz::ZERO),
        })
    }
}

impl ToNode for Model {
    fn to_node(&self) -> Node {
        NodeBuilder::new(ENTITY)
            .string(self.path.as_str())
            .flag("hide", self.hide)
            .opt_field(&OPACITY, self.opacity.as_ref())
            .child(xyz_node("offset", self.offset))
            .child(xyz_node("scale", self.scale))
            .child(xyz_node("rotate", self.rotate))
            .build()
    }
}

pub mod api_model;
pub mod identifier;
pub mod member;
pub mod modifiers;
pub mod package;
pub mod type_node;

pub use api_model::{ApiModel, ApiModelBuilder};
pub use identifier::Identifier;
pub use member::{MemberDecl, MemberKind, MemberNode, Param};
pub use modifiers::{ModifierFlag, Modifiers, Visibility};
pub use package::PackageNode;
pub use type_node::{TypeDecl, TypeKind, TypeNode};

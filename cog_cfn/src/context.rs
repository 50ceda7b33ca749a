//! The assembly context owned by a single template-assembly run.

use crate::catalog::{AssetSource, Fragment};
use crate::groups::{GroupKey, GroupRegistry, MemberList, PresentationGroup};
use crate::template::Template;
use crate::{CfnError, CfnResult};

/// Owns the template under construction and the presentation group registry.
///
/// One context is created per run, every registration goes through it by
/// mutable reference, and it is consumed with [`Self::into_template`] once
/// the document is complete.
#[derive(Debug, Default)]
pub struct AssemblyContext {
    pub(crate) template: Template,
    pub(crate) groups: GroupRegistry,
}

impl AssemblyContext {
    /// Creates a context whose template carries `description`.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        let mut template = Template::new();
        template.set_description(description);
        Self {
            template,
            groups: GroupRegistry::new(),
        }
    }

    /// The template under construction.
    #[must_use]
    pub const fn template(&self) -> &Template {
        &self.template
    }

    /// Mutable access for declarations that bypass the registrar.
    pub const fn template_mut(&mut self) -> &mut Template {
        &mut self.template
    }

    /// The presentation group registry.
    #[must_use]
    pub const fn groups(&self) -> &GroupRegistry {
        &self.groups
    }

    /// Builds the presentation record for `key`.
    ///
    /// The returned members alias the registry: ids prepended to them show up
    /// in every later lookup of the same group and in the generated document.
    pub fn parameter_group(
        &mut self,
        key: impl Into<GroupKey>,
        label: impl Into<String>,
    ) -> PresentationGroup {
        self.groups.presentation_group(&key.into(), label)
    }

    /// Prepends `id` to `members` after checking that it names a declared
    /// parameter.
    ///
    /// # Errors
    ///
    /// Returns [`CfnError::UndeclaredParameter`] when `id` is not declared;
    /// the list is left unchanged.
    pub fn prepend_declared(&self, members: &MemberList, id: &str) -> CfnResult<()> {
        if !self.template.has_parameter(id) {
            return Err(CfnError::UndeclaredParameter { id: id.to_owned() });
        }
        members.prepend(id);
        Ok(())
    }

    /// Merges a catalog fragment into the template.
    ///
    /// # Errors
    ///
    /// Propagates fragment parsing and asset resolution failures.
    pub fn include_fragment(&mut self, fragment: &Fragment, assets: &AssetSource) -> CfnResult<()> {
        fragment.merge_into(&mut self.template, assets)
    }

    /// Consumes the context and returns the finished template.
    #[must_use]
    pub fn into_template(self) -> Template {
        self.template
    }
}

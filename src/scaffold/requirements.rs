//! Ansible role requirements shared by every generated sandbox.

/// One external role pulled in by the provisioning stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRequirement {
    pub name: &'static str,
    pub src: &'static str,
    pub scm: &'static str,
    pub version: &'static str,
}

pub const REQUIRED_ROLES: &[RoleRequirement] = &[
    RoleRequirement {
        name: "disable-qxl",
        src: "https://gitlab.ics.muni.cz/muni-kypo/ansible-roles/disable-qxl.git",
        scm: "git",
        version: "1.0.0",
    },
    RoleRequirement {
        name: "sandbox-logging-bash",
        src: "https://gitlab.ics.muni.cz/muni-kypo/ansible-roles/sandbox-logging-bash.git",
        scm: "git",
        version: "1.0.1",
    },
    RoleRequirement {
        name: "sandbox-logging-forward",
        src: "https://gitlab.ics.muni.cz/muni-kypo/ansible-roles/sandbox-logging-forward.git",
        scm: "git",
        version: "1.0.1",
    },
    RoleRequirement {
        name: "kypo-user-access",
        src: "https://gitlab.ics.muni.cz/muni-kypo-crp/backend-python/ansible-networking-stage/kypo-user-access.git",
        scm: "git",
        version: "1.0.0",
    },
    RoleRequirement {
        name: "hosts-aliases",
        src: "https://gitlab.ics.muni.cz/muni-kypo/ansible-roles/hosts-aliases.git",
        scm: "git",
        version: "1.0.0",
    },
];

/// Render `requirements.yml`: one block per role, blank line between blocks.
pub fn render_requirements() -> String {
    REQUIRED_ROLES
        .iter()
        .map(|role| {
            format!(
                "- name: {}\n  src: {}\n  scm: {}\n  version: {}\n",
                role.name, role.src, role.scm, role.version
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

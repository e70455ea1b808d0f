//! Fixed names shared across the pipeline.

pub const APP_NAME: &str = "kdiff";

/// File whose presence marks a directory as a kustomize build root.
pub const MARKER_FILENAME: &str = "kustomization.yaml";

/// Descriptor `kind` for fragments that cannot be built on their own.
pub const COMPONENT_KIND: &str = "Component";

/// Filename written inside each reconstructed root directory.
pub const MANIFEST_FILENAME: &str = "manifests.yaml";

/// Pathspec magic selecting files git marks as strongbox-encrypted.
/// See https://git-scm.com/docs/gitglossary#Documentation/gitglossary.txt-aiddefpathspecapathspec
pub const ENCRYPTED_PATHSPEC: &str = ":(attr:filter=strongbox diff=strongbox)";

/// Pathspec that matches nothing.
///
/// Always passed to `git ls-files` so an empty root set lists nothing rather
/// than everything, and to sidestep an `ls-files` bug with nested attributes:
/// https://lore.kernel.org/git/CAEzX-aD1wfgp8AvNNfCXVM3jAaAjK+uFTqS2XP4CJbVvFr2BtQ@mail.gmail.com/
pub const NO_MATCH_PATHSPEC: &str = "not/a/path";

pub const DEFAULT_BUILD_PROGRAM: &str = "kustomize";

pub const KUSTOMIZE_INSTALL_URL: &str = "https://kubectl.docs.kubernetes.io/installation/kustomize/";

/// Environment variable overriding the build program.
pub const BUILD_PROGRAM_ENV: &str = "KDIFF_KUSTOMIZE";

use std::fs;

use ast::Variant;
use pipeline::{generate_all_spec_files, generate_spec_files, GeneratorOptions};

fn fixture_module() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().expect("Failed to create temporary directory");
    let dir = tmp.path().join("manifests");
    fs::create_dir_all(&dir).expect("Failed to create manifests directory");
    let manifests = [
        ("init.pp", "class tomcat (\n  $user = 'tomcat',\n) inherits tomcat::params {}\n"),
        ("params.pp", "class tomcat::params {\n  $version = '9'\n}\n"),
        ("instance.pp", "define tomcat::instance (\n  String $catalina_home,\n) {}\n"),
        ("site.pp", "node 'web01.example.com' {\n  include tomcat\n}\n"),
        ("broken.pp", "class tomcat::broken {\n  $x = 'never closed\n"),
        ("alias.pp", "type Tomcat::Port = Integer[1, 65535]\n"),
    ];
    for (name, source) in manifests {
        fs::write(dir.join(name), source).expect("Failed to write manifest");
    }
    tmp
}

#[test]
fn test_batch_skips_other_variants_and_malformed_manifests() {
    let module = fixture_module();
    let root = module.path();
    let options = GeneratorOptions::default();

    let classes = generate_spec_files(root, Variant::Class, &options).expect("class batch");
    assert_eq!(
        classes,
        vec![root.join("spec/classes/tomcat_spec.rb"), root.join("spec/classes/params_spec.rb")]
    );

    let defines = generate_spec_files(root, Variant::Definition, &options).expect("define batch");
    assert_eq!(defines, vec![root.join("spec/defines/instance_spec.rb")]);
}

#[test]
fn test_all_variants_in_order() {
    let module = fixture_module();
    let root = module.path();

    let written =
        generate_all_spec_files(root, &GeneratorOptions::default()).expect("full batch");
    assert_eq!(
        written,
        vec![
            root.join("spec/classes/tomcat_spec.rb"),
            root.join("spec/classes/params_spec.rb"),
            root.join("spec/defines/instance_spec.rb"),
            root.join("spec/nodes/site_spec.rb"),
        ]
    );

    let node = fs::read_to_string(root.join("spec/nodes/site_spec.rb")).expect("node scaffold");
    assert!(node.contains("describe 'web01.example.com' do\n"));
    assert!(node.contains("  it { is_expected.to contain_class('tomcat') }\n"));
}

#[test]
fn test_node_batch_without_nodes_is_empty() {
    let tmp = tempfile::tempdir().expect("Failed to create temporary directory");
    let dir = tmp.path().join("manifests");
    fs::create_dir_all(&dir).expect("Failed to create manifests directory");
    fs::write(dir.join("init.pp"), "class ntp {}\n").expect("Failed to write manifest");

    let written = generate_spec_files(tmp.path(), Variant::Node, &GeneratorOptions::default())
        .expect("node batch");
    assert!(written.is_empty());
    assert!(!tmp.path().join("spec/nodes").exists());
}

#[cfg(unix)]
#[test]
fn test_symlinked_manifest_is_generated() {
    let module = fixture_module();
    let root = module.path();
    let shared = root.join("ntp.pp");
    fs::write(&shared, "class ntp (\n  $servers = [],\n) {}\n").expect("Failed to write manifest");
    std::os::unix::fs::symlink(&shared, root.join("manifests/ntp.pp")).expect("Failed to link manifest");

    let classes =
        generate_spec_files(root, Variant::Class, &GeneratorOptions::default()).expect("class batch");
    assert!(classes.contains(&root.join("spec/classes/ntp_spec.rb")));
    let scaffold = fs::read_to_string(root.join("spec/classes/ntp_spec.rb")).expect("ntp scaffold");
    assert!(scaffold.contains("describe 'ntp' do\n"));
}


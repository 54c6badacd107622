use figure_demos::rendering_lib::shader::{FIGURE_SHADER_SOURCE, WGSL_SHADER_SOURCE};

fn validate_shader(source: &str) {
    let module = naga::front::wgsl::parse_str(source).expect("wgsl parse");
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator.validate(&module).expect("wgsl validate");
}

#[test]
fn compile_shapes_shader() {
    validate_shader(WGSL_SHADER_SOURCE);
}

#[test]
fn compile_figure_shader() {
    validate_shader(FIGURE_SHADER_SOURCE);
}

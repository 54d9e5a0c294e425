use collada_lite::core::shared::{ConfigType, SkipReason, Warning, FALLBACK_NORMAL};
use collada_lite::decode::{self, Config};
use collada_lite::io::sink::{RecordingSink, UP_AXIS_ROTATION_X};

fn decode_str(doc: &str, sink: &mut RecordingSink) -> Result<decode::Summary, decode::Err> {
    decode::decode_str(doc, sink, Config::default())
}

#[test]
fn textured_quad_file() {
    let mut sink = RecordingSink::default();
    let summary =
        decode::decode_file("tests/data/textured_quad.dae", &mut sink, Config::default()).unwrap();

    assert_eq!(summary.imported, 1);
    assert!(summary.skipped.is_empty());
    assert!(summary.warnings.is_empty());

    let mesh = &sink.meshes[0];
    assert_eq!(mesh.name, "Quad");
    assert_eq!(
        mesh.positions,
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ]
    );
    assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
    assert_eq!(mesh.corner_normals, vec![[0.0, 0.0, 1.0]; 6]);
    assert_eq!(
        mesh.corner_uvs,
        vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
        ]
    );
    assert!(mesh.corner_colors.is_empty());
    // material label is the texture base name
    assert_eq!(mesh.material_labels, vec!["wood".to_owned()]);
    assert_eq!(mesh.face_materials, vec![Some(0), Some(0)]);

    let object = &sink.objects[0];
    assert_eq!(object.name, "Quad");
    assert_eq!(object.mesh, 0);
    assert_eq!(object.rotation_x, UP_AXIS_ROTATION_X);
}

#[test]
fn decoding_twice_is_identical() {
    let mut first = RecordingSink::default();
    let mut second = RecordingSink::default();
    decode::decode_file("tests/data/textured_quad.dae", &mut first, Config::default()).unwrap();
    decode::decode_file("tests/data/textured_quad.dae", &mut second, Config::default()).unwrap();
    assert_eq!(first.meshes, second.meshes);
    assert_eq!(first.objects, second.objects);
}

#[test]
fn one_bad_geometry_does_not_abort_the_others() {
    let doc = r##"
        <COLLADA>
          <library_geometries>
            <geometry id="empty-geom"/>
            <geometry id="tri-geom" name="Tri">
              <mesh>
                <source id="pos">
                  <float_array>0 0 0 1 0 0 0 1 0</float_array>
                </source>
                <vertices id="verts"><input semantic="POSITION" source="#pos"/></vertices>
                <triangles count="1">
                  <input semantic="VERTEX" source="#verts" offset="0"/>
                  <p>0 1 2</p>
                </triangles>
              </mesh>
            </geometry>
            <geometry id="no-vertex-geom">
              <mesh>
                <source id="pos2">
                  <float_array>0 0 0 1 0 0 0 1 0</float_array>
                </source>
                <vertices id="verts2"><input semantic="POSITION" source="#pos2"/></vertices>
                <triangles count="1">
                  <input semantic="NORMAL" source="#pos2" offset="0"/>
                  <p>0 1 2</p>
                </triangles>
              </mesh>
            </geometry>
          </library_geometries>
        </COLLADA>"##;

    let mut sink = RecordingSink::default();
    let summary = decode_str(doc, &mut sink).unwrap();

    assert_eq!(summary.imported, 1);
    assert_eq!(sink.meshes.len(), 1);
    assert_eq!(sink.meshes[0].name, "Tri");
    assert_eq!(sink.meshes[0].faces, vec![[0, 1, 2]]);
    // skips keep document order and their reasons
    assert_eq!(summary.skipped.len(), 2);
    assert_eq!(summary.skipped[0].geometry, "empty-geom");
    assert_eq!(summary.skipped[0].reason, SkipReason::NoMeshNode);
    assert_eq!(summary.skipped[1].geometry, "no-vertex-geom");
    assert_eq!(summary.skipped[1].reason, SkipReason::MissingVertexInput);
}

#[test]
fn degenerate_only_geometry_is_skipped() {
    let doc = r##"
        <COLLADA>
          <library_geometries>
            <geometry id="degenerate">
              <mesh>
                <source id="pos"><float_array>0 0 0 1 0 0 0 1 0</float_array></source>
                <vertices id="verts"><input semantic="POSITION" source="#pos"/></vertices>
                <triangles count="1">
                  <input semantic="VERTEX" source="#verts" offset="0"/>
                  <p>0 0 2</p>
                </triangles>
              </mesh>
            </geometry>
            <geometry id="good">
              <mesh>
                <source id="pos2"><float_array>0 0 0 1 0 0 0 1 0</float_array></source>
                <vertices id="verts2"><input semantic="POSITION" source="#pos2"/></vertices>
                <triangles count="1">
                  <input semantic="VERTEX" source="#verts2" offset="0"/>
                  <p>0 1 2</p>
                </triangles>
              </mesh>
            </geometry>
          </library_geometries>
        </COLLADA>"##;

    let mut sink = RecordingSink::default();
    let summary = decode_str(doc, &mut sink).unwrap();
    assert_eq!(summary.imported, 1);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].reason, SkipReason::NoValidFaces);
}

#[test]
fn material_tags_order_lexicographically_across_blocks() {
    let doc = r##"
        <COLLADA>
          <library_geometries>
            <geometry id="two-mats">
              <mesh>
                <source id="pos">
                  <float_array>0 0 0 1 0 0 1 1 0 0 1 0</float_array>
                </source>
                <vertices id="verts"><input semantic="POSITION" source="#pos"/></vertices>
                <triangles count="1" material="zebra">
                  <input semantic="VERTEX" source="#verts" offset="0"/>
                  <p>0 1 2</p>
                </triangles>
                <triangles count="1" material="apple">
                  <input semantic="VERTEX" source="#verts" offset="0"/>
                  <p>0 2 3</p>
                </triangles>
              </mesh>
            </geometry>
          </library_geometries>
        </COLLADA>"##;

    let mut sink = RecordingSink::default();
    let summary = decode_str(doc, &mut sink).unwrap();
    assert_eq!(summary.imported, 1);
    let mesh = &sink.meshes[0];
    assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
    assert_eq!(mesh.material_labels, vec!["apple".to_owned(), "zebra".to_owned()]);
    assert_eq!(mesh.face_materials, vec![Some(1), Some(0)]);
}

#[test]
fn second_block_with_a_different_position_source_is_rejected() {
    let doc = r##"
        <COLLADA>
          <library_geometries>
            <geometry id="mixed">
              <mesh>
                <source id="pos-a"><float_array>0 0 0 1 0 0 0 1 0</float_array></source>
                <source id="pos-b"><float_array>9 9 9 8 8 8 7 7 7</float_array></source>
                <vertices id="verts-a"><input semantic="POSITION" source="#pos-a"/></vertices>
                <vertices id="verts-b"><input semantic="POSITION" source="#pos-b"/></vertices>
                <triangles count="1">
                  <input semantic="VERTEX" source="#verts-a" offset="0"/>
                  <p>0 1 2</p>
                </triangles>
                <triangles count="1">
                  <input semantic="VERTEX" source="#verts-b" offset="0"/>
                  <p>0 1 2</p>
                </triangles>
              </mesh>
            </geometry>
          </library_geometries>
        </COLLADA>"##;

    let mut sink = RecordingSink::default();
    let summary = decode_str(doc, &mut sink).unwrap();
    assert_eq!(summary.imported, 1);
    assert_eq!(sink.meshes[0].faces.len(), 1);
    assert_eq!(sink.meshes[0].positions[0], [0.0, 0.0, 0.0]);
    assert_eq!(
        summary.warnings,
        vec![Warning::MixedPositionSources {
            first: "pos-a".to_owned(),
            other: "pos-b".to_owned(),
        }]
    );
}

#[test]
fn out_of_range_normal_index_falls_back() {
    let doc = r##"
        <COLLADA>
          <library_geometries>
            <geometry id="fallback">
              <mesh>
                <source id="pos"><float_array>0 0 0 1 0 0 0 1 0</float_array></source>
                <source id="norm"><float_array>0 1 0</float_array></source>
                <vertices id="verts"><input semantic="POSITION" source="#pos"/></vertices>
                <triangles count="1">
                  <input semantic="VERTEX" source="#verts" offset="0"/>
                  <input semantic="NORMAL" source="#norm" offset="1"/>
                  <p>0 0 1 7 2 0</p>
                </triangles>
              </mesh>
            </geometry>
          </library_geometries>
        </COLLADA>"##;

    let mut sink = RecordingSink::default();
    decode_str(doc, &mut sink).unwrap();
    let mesh = &sink.meshes[0];
    assert_eq!(mesh.corner_normals[0], [0.0, 1.0, 0.0]);
    assert_eq!(mesh.corner_normals[1], FALLBACK_NORMAL);
    assert_eq!(mesh.corner_normals[2], [0.0, 1.0, 0.0]);
}

#[test]
fn zero_imported_geometries_is_fatal() {
    let doc = r##"
        <COLLADA>
          <library_geometries>
            <geometry id="empty-geom"/>
          </library_geometries>
        </COLLADA>"##;

    let mut sink = RecordingSink::default();
    match decode_str(doc, &mut sink) {
        Err(decode::Err::NothingImported { skipped }) => {
            assert_eq!(skipped.len(), 1);
            assert_eq!(skipped[0].reason, SkipReason::NoMeshNode);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(sink.meshes.is_empty());
}

#[test]
fn malformed_xml_is_fatal() {
    let mut sink = RecordingSink::default();
    match decode_str("<COLLADA><geometry>", &mut sink) {
        Err(decode::Err::MalformedDocument(_)) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn missing_file_is_fatal() {
    let mut sink = RecordingSink::default();
    match decode::decode_file("tests/data/does_not_exist.dae", &mut sink, Config::default()) {
        Err(decode::Err::Io { .. }) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn unparsable_position_array_skips_the_geometry() {
    let doc = r##"
        <COLLADA>
          <library_geometries>
            <geometry id="bad-floats">
              <mesh>
                <source id="pos"><float_array>0 0 zero 1 0 0 0 1 0</float_array></source>
                <vertices id="verts"><input semantic="POSITION" source="#pos"/></vertices>
                <triangles count="1">
                  <input semantic="VERTEX" source="#verts" offset="0"/>
                  <p>0 1 2</p>
                </triangles>
              </mesh>
            </geometry>
            <geometry id="good">
              <mesh>
                <source id="pos2"><float_array>0 0 0 1 0 0 0 1 0</float_array></source>
                <vertices id="verts2"><input semantic="POSITION" source="#pos2"/></vertices>
                <triangles count="1">
                  <input semantic="VERTEX" source="#verts2" offset="0"/>
                  <p>0 1 2</p>
                </triangles>
              </mesh>
            </geometry>
          </library_geometries>
        </COLLADA>"##;

    let mut sink = RecordingSink::default();
    let summary = decode_str(doc, &mut sink).unwrap();
    assert_eq!(summary.imported, 1);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(
        summary.skipped[0].reason,
        SkipReason::EmptyPositionSource {
            source: "pos".to_owned()
        }
    );
    assert!(summary
        .warnings
        .contains(&Warning::UnparsableFloatArray {
            source: "pos".to_owned()
        }));
}

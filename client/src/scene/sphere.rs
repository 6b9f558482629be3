use bevy::{color::ColorToComponents, prelude::*};
use jets_core::{hex_to_rgb, sphere::random_facet_colors, SceneConfig};
use rand::Rng;

#[derive(Component)]
pub struct FacetedSphere;

/// Flat-shades an indexed mesh and gives every triangle its own random color.
pub fn color_facets<R: Rng>(mut mesh: Mesh, rng: &mut R) -> Mesh {
    mesh.duplicate_vertices();
    mesh.compute_flat_normals();

    let facets = mesh.count_vertices() / 3;
    let colors: Vec<[f32; 4]> = random_facet_colors(facets, rng)
        .into_iter()
        .flat_map(|hex| {
            let [r, g, b] = hex_to_rgb(hex);
            let color = Color::srgb_u8(r, g, b).to_linear().to_f32_array();
            [color; 3]
        })
        .collect();
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh
}

pub fn spawn_sphere(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<SceneConfig>,
) {
    let settings = &config.sphere;
    let mesh = match Sphere::new(settings.radius).mesh().ico(settings.subdivisions) {
        Ok(mesh) => color_facets(mesh, &mut rand::thread_rng()),
        Err(err) => {
            error!("Could not build the sphere mesh: {err}");
            return;
        }
    };

    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: settings.perceptual_roughness(),
        reflectance: 0.5,
        ..default()
    });

    let pose = settings.motion.pose_at(0.0);
    commands.spawn((
        FacetedSphere,
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(material),
        Transform::from_translation(pose.translation()).with_rotation(pose.rotation()),
    ));
}

/// Places the sphere from elapsed wall-clock time; nothing accumulates.
pub fn animate_sphere_system(
    time: Res<Time>,
    config: Res<SceneConfig>,
    mut spheres: Query<&mut Transform, With<FacetedSphere>>,
) {
    let pose = config
        .sphere
        .motion
        .pose_for_elapsed(time.elapsed_secs_f64());
    for mut transform in &mut spheres {
        transform.translation = pose.translation();
        transform.rotation = pose.rotation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_color_facets_one_color_per_triangle() {
        let mesh = Sphere::new(400.0).mesh().ico(1).unwrap();
        let mesh = color_facets(mesh, &mut StdRng::seed_from_u64(3));

        assert!(mesh.indices().is_none());
        assert_eq!(mesh.count_vertices(), 80 * 3);

        let Some(VertexAttributeValues::Float32x4(colors)) = mesh.attribute(Mesh::ATTRIBUTE_COLOR)
        else {
            panic!("sphere should carry vertex colors");
        };
        for triangle in colors.chunks(3) {
            assert_eq!(triangle[0], triangle[1]);
            assert_eq!(triangle[1], triangle[2]);
        }
    }
}

//! Procedural monster generation from templated ranges

use crate::monster::{Monster, MonsterAttack};
use crate::stats::Stats;
use crate::types::{MonsterDifficulty, MonsterType};
use rand::seq::SliceRandom;
use rand::Rng;
use tables_core::LootTable;

/// Spawn one monster scaled to the player's level
///
/// `index` numbers the monster within its batch and feeds its id and name.
pub fn spawn_monster<R: Rng>(index: usize, player_level: u32, rng: &mut R) -> Monster {
    let monster_type = *MonsterType::all()
        .choose(rng)
        .unwrap_or(&MonsterType::Beast);
    let difficulty = if rng.gen_bool(0.5) {
        MonsterDifficulty::Easy
    } else {
        MonsterDifficulty::Normal
    };

    let stats = Stats {
        strength: rng.gen_range(10..=14) as f64,
        dexterity: rng.gen_range(10..=14) as f64,
        intelligence: rng.gen_range(10..=14) as f64,
        vitality: rng.gen_range(10..=14) as f64,
        health: rng.gen_range(100..=149) as f64,
        mana: rng.gen_range(50..=69) as f64,
    };

    let attacks = vec![
        MonsterAttack::new(
            "Slash",
            "slashes with its claws",
            rng.gen_range(10..=14) as f64,
            0,
        ),
        MonsterAttack::new(
            "Bite",
            "bites with sharp teeth",
            rng.gen_range(15..=22) as f64,
            2,
        ),
    ];

    let id = format!("monster_{}", index);
    let loot_table = LootTable::gold_only(id.clone(), 5, 20);
    let experience_value = rng.gen_range(50..=79);

    Monster {
        name: format!("{} {}", monster_type, index + 1),
        id,
        monster_type,
        difficulty,
        level: player_level.max(1),
        stats,
        attacks,
        loot_table,
        experience_value,
    }
}

/// Spawn a batch of monsters numbered from zero
pub fn spawn_monsters<R: Rng>(count: usize, player_level: u32, rng: &mut R) -> Vec<Monster> {
    let monsters: Vec<Monster> = (0..count)
        .map(|i| spawn_monster(i, player_level, rng))
        .collect();
    tracing::debug!(count, player_level, "monsters spawned");
    monsters
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_test_rng() -> StdRng {
        StdRng::seed_from_u64(12345)
    }

    #[test]
    fn test_spawn_ranges() {
        let mut rng = make_test_rng();
        for monster in spawn_monsters(200, 3, &mut rng) {
            assert_eq!(monster.level, 3);
            assert!(matches!(
                monster.difficulty,
                MonsterDifficulty::Easy | MonsterDifficulty::Normal
            ));
            for value in [
                monster.stats.strength,
                monster.stats.dexterity,
                monster.stats.intelligence,
                monster.stats.vitality,
            ] {
                assert!((10.0..=14.0).contains(&value));
            }
            assert!((100.0..=149.0).contains(&monster.stats.health));
            assert!((50.0..=69.0).contains(&monster.stats.mana));
            assert!((50..=79).contains(&monster.experience_value));

            assert_eq!(monster.attacks.len(), 2);
            assert!((10.0..=14.0).contains(&monster.attacks[0].damage));
            assert_eq!(monster.attacks[1].cooldown, 2);
            assert!((15.0..=22.0).contains(&monster.attacks[1].damage));

            assert!(monster.loot_table.possible_items.is_empty());
            assert_eq!(monster.loot_table.gold_range.min, 5);
            assert_eq!(monster.loot_table.gold_range.max, 20);
        }
    }

    #[test]
    fn test_ids_and_names() {
        let monsters = spawn_monsters(3, 1, &mut make_test_rng());
        assert_eq!(monsters[2].id, "monster_2");
        assert!(monsters[2].name.ends_with(" 3"));
        assert_eq!(monsters[2].loot_table.monster_id, "monster_2");
    }

    #[test]
    fn test_same_seed_same_monsters() {
        let a = spawn_monsters(5, 2, &mut make_test_rng());
        let b = spawn_monsters(5, 2, &mut make_test_rng());
        assert_eq!(a, b);
    }
}

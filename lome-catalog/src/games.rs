use serde::Serialize;

/// One card of the included-games showcase
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GameEntry {
    pub key: &'static str,
    pub image: &'static str,
    pub alt: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

// Placeholder lineup until the published catalog is wired in
const GAMES: &[GameEntry] = &[
    GameEntry {
        key: "beat-saber",
        image: "/img/games/beat-saber.webp",
        alt: "Sables de luz cortando cubos al ritmo de la música",
        name: "Beat Saber",
        description: "Ritmo y sables de luz. Ideal para mover el cuerpo y competir entre amigos.",
    },
    GameEntry {
        key: "superhot",
        image: "/img/games/superhot.webp",
        alt: "Figuras rojas de cristal en un escenario blanco",
        name: "SUPERHOT VR",
        description: "El tiempo solo avanza cuando te movés. Acción táctica en cámara lenta.",
    },
    GameEntry {
        key: "walkabout",
        image: "/img/games/walkabout.webp",
        alt: "Campo de minigolf en una isla al atardecer",
        name: "Walkabout Mini Golf",
        description: "Minigolf relajado con escenarios fantásticos, perfecto para jugar en familia.",
    },
    GameEntry {
        key: "creed",
        image: "/img/games/creed.webp",
        alt: "Ring de boxeo iluminado frente al rival",
        name: "Creed: Rise to Glory",
        description: "Boxeo en primera persona. Un entrenamiento completo sin darte cuenta.",
    },
    GameEntry {
        key: "first-steps",
        image: "/img/games/first-steps.webp",
        alt: "Manos virtuales tomando objetos en una sala futurista",
        name: "First Steps",
        description: "La mejor introducción a la realidad virtual para quien la prueba por primera vez.",
    },
    GameEntry {
        key: "richies-plank",
        image: "/img/games/richies-plank.webp",
        alt: "Tabla de madera saliendo de un edificio a gran altura",
        name: "Richie's Plank Experience",
        description: "Caminá por una tabla a 80 pisos de altura. Vértigo garantizado.",
    },
];

/// Games bundled with every rental, in showcase order
pub fn included_games() -> &'static [GameEntry] {
    GAMES
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_game_keys_unique() {
        let keys: HashSet<_> = included_games().iter().map(|g| g.key).collect();
        assert_eq!(keys.len(), included_games().len());
    }

    #[test]
    fn test_every_game_has_alt_text() {
        assert!(included_games().iter().all(|g| !g.alt.is_empty() && !g.name.is_empty()));
    }
}
